use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use log::debug;

use irv_ranking::{Chooser, Decision, RankingErrors, RoundOutcome, VoteTable};

/// Asks a person at a terminal: the table is shown, and the answer is read one
/// line at a time from `input`.
pub struct TerminalChooser<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TerminalChooser<StdinLock<'static>, Stdout> {
    pub fn stdio() -> TerminalChooser<StdinLock<'static>, Stdout> {
        let stdin: Stdin = io::stdin();
        TerminalChooser::new(stdin.lock(), io::stdout())
    }
}

fn failed(e: io::Error) -> RankingErrors {
    RankingErrors::ChooserFailed(e.to_string())
}

impl<R: BufRead, W: Write> TerminalChooser<R, W> {
    pub fn new(input: R, output: W) -> TerminalChooser<R, W> {
        TerminalChooser { input, output }
    }

    fn read_line(&mut self) -> Result<Option<String>, RankingErrors> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).map_err(failed)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    }

    fn prompt(&mut self, message: &str) -> Result<(), RankingErrors> {
        write!(self.output, "{}", message).map_err(failed)?;
        self.output.flush().map_err(failed)
    }
}

impl<R: BufRead, W: Write> Chooser for TerminalChooser<R, W> {
    fn choose(&mut self, table: &VoteTable, decision: Decision) -> Result<usize, RankingErrors> {
        write!(self.output, "{}", table).map_err(failed)?;
        let message = match decision {
            Decision::UnbreakableTie => {
                "** I found an unbreakable tie. Which candidate do you want to eliminate? "
            }
            Decision::Elimination => "Which candidate to eliminate? Please enter a number: ",
        };
        loop {
            self.prompt(message)?;
            let line = self.read_line()?.ok_or_else(|| {
                RankingErrors::ChooserFailed("no more input to read a choice".to_string())
            })?;
            match line.parse::<usize>() {
                Ok(index) => return Ok(index),
                Err(_) => {
                    debug!("TerminalChooser: not a number: {:?}", line);
                    writeln!(self.output, "{:?} is not a number.", line).map_err(failed)?;
                }
            }
        }
    }

    fn announce_elimination(&mut self, name: &str) -> Result<(), RankingErrors> {
        writeln!(self.output, "OK, I'm eliminating {}...", name).map_err(failed)
    }

    fn announce_outcome(&mut self, outcome: &RoundOutcome) -> Result<(), RankingErrors> {
        let message = match outcome {
            RoundOutcome::Ranked { name, position } => format!(
                "Determined that {} is rank {}. Press enter to continue...",
                name, position
            ),
            RoundOutcome::Ineligible { name } => format!(
                "Determined that {} is ineligible to win. Press enter to continue...",
                name
            ),
        };
        self.prompt(&message)?;
        // Reaching the end of the input is not an error here.
        self.read_line()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irv_ranking::builder::Builder;
    use std::io::Cursor;

    fn table() -> VoteTable {
        let mut b = Builder::new()
            .candidates(&["A".to_string(), "B".to_string()])
            .unwrap();
        b.add_ballot_simple(&[1, 2]).unwrap();
        b.add_ballot_simple(&[2, 1]).unwrap();
        b.build().unwrap()
    }

    fn chooser(input: &str) -> TerminalChooser<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalChooser::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_a_number() {
        let mut c = chooser("1\n");
        assert_eq!(c.choose(&table(), Decision::Elimination).unwrap(), 1);
        let out = String::from_utf8(c.output).unwrap();
        assert!(out.contains("# of votes in rank::"));
        assert!(out.ends_with("Which candidate to eliminate? Please enter a number: "));
    }

    #[test]
    fn asks_again_after_garbage() {
        let mut c = chooser("abc\n\n 0 \n");
        assert_eq!(c.choose(&table(), Decision::UnbreakableTie).unwrap(), 0);
        let out = String::from_utf8(c.output).unwrap();
        assert_eq!(out.matches("unbreakable tie").count(), 3);
        assert!(out.contains("\"abc\" is not a number."));
    }

    #[test]
    fn end_of_input() {
        let mut c = chooser("x\n");
        assert!(matches!(
            c.choose(&table(), Decision::Elimination),
            Err(RankingErrors::ChooserFailed(_))
        ));
    }

    #[test]
    fn announcements() {
        let mut c = chooser("\n");
        c.announce_elimination("B").unwrap();
        c.announce_outcome(&RoundOutcome::Ranked {
            name: "A".to_string(),
            position: 1,
        })
        .unwrap();
        c.announce_outcome(&RoundOutcome::Ineligible {
            name: "B".to_string(),
        })
        .unwrap();
        let out = String::from_utf8(c.output).unwrap();
        assert_eq!(
            out,
            "OK, I'm eliminating B...\n\
             Determined that A is rank 1. Press enter to continue...\
             Determined that B is ineligible to win. Press enter to continue..."
        );
    }
}
