use super::candidate;
use std::io::{self, Lines, StdinLock};

/// Reads one candidate name per line of standard input.
pub struct StdinScanner {
    inner: Lines<StdinLock<'static>>,
}

impl StdinScanner {
    fn new() -> Self {
        Self {
            inner: io::stdin().lines(),
        }
    }

    pub fn init() -> Box<dyn Iterator<Item = String>> {
        Box::new(Self::new())
    }
}

impl Iterator for StdinScanner {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(line) => match candidate(&line) {
                    Some(name) => return Some(name),
                    None => continue,
                },
                Err(e) => {
                    log::warn!("stopped reading stdin: {e}");
                    return None;
                }
            }
        }
    }
}
