use std::io;

use bankist_lib::runtime::Command;
use futures_util::{stream, Stream, TryStreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};

pub const USAGE: &str = "\
commands:
  login <username> <pin>
  transfer <username> <amount>
  loan <amount>
  close <username> <pin>
  sort
  logout
  quit";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}' (try login, transfer, loan, close, sort, logout or quit)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one line of user input.
///
/// Blank lines parse to nothing. Amounts and PINs are passed through as typed;
/// the session decides what to make of them.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (verb.to_lowercase().as_str(), args) {
        ("login", [username, pin]) => Command::Login {
            username: (*username).to_string(),
            pin: (*pin).to_string(),
        },
        ("login", _) => return Err(ParseError::Usage("login <username> <pin>")),

        ("transfer", [to, amount]) => Command::Transfer {
            to: (*to).to_string(),
            amount: (*amount).to_string(),
        },
        ("transfer", _) => return Err(ParseError::Usage("transfer <username> <amount>")),

        ("loan", [amount]) => Command::Loan {
            amount: (*amount).to_string(),
        },
        ("loan", _) => return Err(ParseError::Usage("loan <amount>")),

        ("close", [username, pin]) => Command::Close {
            username: (*username).to_string(),
            pin: (*pin).to_string(),
        },
        ("close", _) => return Err(ParseError::Usage("close <username> <pin>")),

        ("sort", []) => Command::Sort,
        ("logout", []) => Command::Logout,
        ("quit" | "exit", []) => Command::Quit,

        _ => return Err(ParseError::Unknown(line.trim().to_string())),
    };

    Ok(Some(command))
}

/// Commands typed on stdin, one per line, until stdin closes or fails.
///
/// Lines that don't parse are reported and skipped. A read error is yielded
/// once and ends the stream.
pub fn stdin() -> impl Stream<Item = io::Result<Command>> + Unpin {
    let lines = BufReader::new(tokio::io::stdin()).lines();

    let lines = stream::unfold(Some(lines), |lines| async move {
        let mut lines = lines?;
        match lines.next_line().await {
            Ok(Some(line)) => Some((Ok(line), Some(lines))),
            Ok(None) => None,
            Err(e) => Some((Err(e), None)),
        }
    });

    Box::pin(lines.try_filter_map(|line| async move {
        let command = parse(&line).unwrap_or_else(|e| {
            println!("{}", e);
            None
        });
        Ok::<_, io::Error>(command)
    }))
}

#[cfg(test)]
mod tests {
    use bankist_lib::runtime::Command;

    use super::{parse, ParseError};

    #[test]
    fn parse_commands() {
        assert_eq!(
            parse("login js 1111"),
            Ok(Some(Command::Login {
                username: "js".to_string(),
                pin: "1111".to_string()
            }))
        );
        assert_eq!(
            parse("  Transfer jd 100.50 "),
            Ok(Some(Command::Transfer {
                to: "jd".to_string(),
                amount: "100.50".to_string()
            }))
        );
        assert_eq!(
            parse("loan 1000"),
            Ok(Some(Command::Loan {
                amount: "1000".to_string()
            }))
        );
        assert_eq!(parse("sort"), Ok(Some(Command::Sort)));
        assert_eq!(parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse("loan"), Err(ParseError::Usage("loan <amount>")));
        assert_eq!(
            parse("login js"),
            Err(ParseError::Usage("login <username> <pin>"))
        );
        assert_eq!(
            parse("deposit 100"),
            Err(ParseError::Unknown("deposit 100".to_string()))
        );
    }
}
