//! Command stream parser

use std::str::FromStr;

use super::Command;
use crate::error::{Result, StoreError};
use crate::record::Seminar;

/// Parse a whole command stream
pub fn parse_commands(input: &str) -> Result<Vec<Command>> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut commands = Vec::new();

    while let Some((line_no, line)) = lines.next() {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or_default();

        let command = match keyword {
            "insert" => {
                let id = parse_field(tokens.next(), line_no, "record id")?;
                expect_end(tokens, line_no)?;
                Command::Insert {
                    record: parse_record(id, line_no, &mut lines)?,
                }
            }
            "delete" => {
                let key = parse_field(tokens.next(), line_no, "record id")?;
                expect_end(tokens, line_no)?;
                Command::Delete { key }
            }
            "search" => {
                let key = parse_field(tokens.next(), line_no, "record id")?;
                expect_end(tokens, line_no)?;
                Command::Search { key }
            }
            "print" => {
                let command = match tokens.next() {
                    Some("hashtable") => Command::PrintHashtable,
                    Some("blocks") => Command::PrintBlocks,
                    other => {
                        return Err(parse_error(
                            line_no,
                            format!("unknown print target {:?}", other.unwrap_or_default()),
                        ))
                    }
                };
                expect_end(tokens, line_no)?;
                command
            }
            other => return Err(parse_error(line_no, format!("unknown command {:?}", other))),
        };

        commands.push(command);
    }

    Ok(commands)
}

/// Parse the four lines following `insert <id>`
fn parse_record<'a>(
    id: u32,
    insert_line: usize,
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Result<Seminar> {
    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| parse_error(insert_line, format!("insert {} is missing its {}", id, what)))
    };

    let (_, title) = next_line("title")?;
    let (details_no, details) = next_line("date line")?;
    let (_, keywords) = next_line("keywords")?;
    let (_, description) = next_line("description")?;

    let mut fields = details.split_whitespace();
    let date = fields
        .next()
        .ok_or_else(|| parse_error(details_no, "missing date".to_string()))?
        .to_string();
    let length = parse_field(fields.next(), details_no, "length")?;
    let x = parse_field(fields.next(), details_no, "x")?;
    let y = parse_field(fields.next(), details_no, "y")?;
    let cost = parse_field(fields.next(), details_no, "cost")?;
    expect_end(fields, details_no)?;

    Ok(Seminar {
        id,
        title: title.to_string(),
        date,
        length,
        x,
        y,
        cost,
        keywords: keywords.split_whitespace().map(str::to_string).collect(),
        description: description.to_string(),
    })
}

fn parse_field<T: FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| parse_error(line, format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {} {:?}", what, token)))
}

fn expect_end<'a>(mut tokens: impl Iterator<Item = &'a str>, line: usize) -> Result<()> {
    match tokens.next() {
        Some(extra) => Err(parse_error(line, format!("unexpected token {:?}", extra))),
        None => Ok(()),
    }
}

fn parse_error(line: usize, message: String) -> StoreError {
    StoreError::Parse { line, message }
}
