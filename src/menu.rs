use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::binet::{ranks_to_values_with, value_to_rank_with, FibonacciError, Rounding};
use crate::display::{describe_nearest, describe_ranks, parse_ranks, parse_value, InputError};
use crate::timing::{measure, Timing};

const MENU_PROMPT: &str = "Enter a function you want to run\n    \
    Enter 1 for finding the nth Fibonacci number\n    \
    Enter 2 for finding the closest Fibonacci number\n    \
    Enter 3 to quit\n";

const RANKS_PROMPT: &str = "Enter the rank(s) you want to find the Fibonacci number(s) for. \
    If you are looking for several ranks enter each one separated by a comma: ";

const VALUE_PROMPT: &str = "Enter the number you want to find the closest Fibonacci number to: ";

const BANNER: &str = "================================================================";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Fibonacci(#[from] FibonacciError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Screen operations the menu relies on.
pub trait Terminal {
    fn clear(&mut self, out: &mut dyn Write) -> io::Result<()>;
    fn pause(&mut self, duration: Duration);
}

/// A terminal driven by ANSI escape sequences.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    pub clear_screen: bool,
}

impl Terminal for Console {
    fn clear(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if self.clear_screen {
            // Erase the display, then move the cursor home.
            write!(out, "\x1B[2J\x1B[1;1H")?;
            out.flush()?;
        }
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Number of timed repetitions, 0 disables the timing report.
    pub iterations: usize,
    /// How long an error message stays on screen before the menu is shown again.
    pub pause: Duration,
    pub rounding: Rounding,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            iterations: 10_000,
            pause: Duration::from_secs(3),
            rounding: Rounding::Nearest,
        }
    }
}

pub fn write_timing(out: &mut impl Write, timing: &Timing) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{BANNER}")?;
    writeln!(out, "ELAPSED TIME:")?;
    writeln!(
        out,
        "MEAN:{} +/- {} SECONDS",
        timing.mean, timing.std_dev
    )?;
    writeln!(out, "{BANNER}")?;
    writeln!(out)
}

/// Looks up the Fibonacci numbers for the comma separated ranks in `text` and reports them.
pub fn rank_lookup(
    out: &mut impl Write,
    text: &str,
    settings: &Settings,
) -> Result<(), SessionError> {
    let ranks = parse_ranks(text)?;
    log::debug!("looking up ranks {ranks:?}");
    let values = ranks_to_values_with(&ranks, settings.rounding)?;

    if settings.iterations > 0 {
        let timing = measure(settings.iterations, || {
            ranks_to_values_with(&ranks, settings.rounding)
        });
        write_timing(out, &timing)?;
    }

    writeln!(out, "{}", describe_ranks(&ranks, &values))?;
    Ok(())
}

/// Finds the Fibonacci number closest to the number in `text` and reports it.
pub fn nearest_lookup(
    out: &mut impl Write,
    text: &str,
    settings: &Settings,
) -> Result<(), SessionError> {
    let a = parse_value(text)?;
    log::debug!("looking up nearest Fibonacci number to {a}");
    let nearest = value_to_rank_with(a, settings.rounding)?;

    if settings.iterations > 0 {
        let timing = measure(settings.iterations, || {
            value_to_rank_with(a, settings.rounding)
        });
        write_timing(out, &timing)?;
    }

    writeln!(out, "{}", describe_nearest(a, &nearest))?;
    Ok(())
}

enum Step {
    Done,
    Rejected(SessionError),
}

/// The interactive menu loop.
pub struct Menu<R, W, T> {
    input: R,
    output: W,
    terminal: T,
    settings: Settings,
}

impl<R: BufRead, W: Write, T: Terminal> Menu<R, W, T> {
    pub fn new(input: R, output: W, terminal: T, settings: Settings) -> Self {
        Menu {
            input,
            output,
            terminal,
            settings,
        }
    }

    pub fn into_parts(self) -> (R, W, T) {
        (self.input, self.output, self.terminal)
    }

    /// Runs until one lookup succeeds, the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.terminal.clear(&mut self.output)?;
            let Some(choice) = self.prompt(MENU_PROMPT)? else {
                return Ok(());
            };
            log::debug!("menu selection {choice:?}");

            let step = match choice.as_str() {
                "1" => self.lookup(RANKS_PROMPT, rank_lookup)?,
                "2" => self.lookup(VALUE_PROMPT, nearest_lookup)?,
                "3" => return Ok(()),
                other => Some(Step::Rejected(
                    InputError::InvalidSelection(other.to_string()).into(),
                )),
            };

            match step {
                None | Some(Step::Done) => return Ok(()),
                Some(Step::Rejected(err)) => self.reject(err)?,
            }
        }
    }

    // Returns `None` when input is exhausted.
    fn lookup<F>(&mut self, prompt: &str, operation: F) -> io::Result<Option<Step>>
    where
        F: FnOnce(&mut W, &str, &Settings) -> Result<(), SessionError>,
    {
        self.terminal.clear(&mut self.output)?;
        let Some(text) = self.prompt(prompt)? else {
            return Ok(None);
        };

        match operation(&mut self.output, &text, &self.settings) {
            Ok(()) => Ok(Some(Step::Done)),
            Err(SessionError::Io(err)) => Err(err),
            Err(err) => Ok(Some(Step::Rejected(err))),
        }
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn reject(&mut self, err: SessionError) -> io::Result<()> {
        log::warn!("rejected input: {err}");
        self.terminal.clear(&mut self.output)?;
        writeln!(self.output, "{err}")?;
        self.output.flush()?;
        self.terminal.pause(self.settings.pause);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        pauses: Vec<Duration>,
    }

    impl Terminal for Recorder {
        fn clear(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.clears += 1;
            Ok(())
        }

        fn pause(&mut self, duration: Duration) {
            self.pauses.push(duration);
        }
    }

    fn quiet() -> Settings {
        Settings {
            iterations: 0,
            pause: Duration::from_millis(5),
            rounding: Rounding::Nearest,
        }
    }

    fn session(input: &str, settings: Settings) -> (String, Recorder) {
        let mut menu = Menu::new(
            input.as_bytes(),
            Vec::new(),
            Recorder::default(),
            settings,
        );
        menu.run().unwrap();
        let (_, output, recorder) = menu.into_parts();
        (String::from_utf8(output).unwrap(), recorder)
    }

    #[test]
    fn rank_lookup_ends_the_session() {
        let (output, recorder) = session("1\n5,10,15\n2\n100\n", quiet());
        assert!(output.contains("The 5th, 10th and 15th Fibonacci numbers are 5, 55 and 610."));
        assert!(!output.contains("closest"));
        assert!(recorder.pauses.is_empty());
        assert_eq!(recorder.clears, 2);
    }

    #[test]
    fn nearest_lookup() {
        let (output, _) = session("2\n100\n", quiet());
        assert!(output.contains("The closest number to 100 in the Fibonacci sequence is 89."));
        assert!(output.contains("immediately higher than 100 is 144."));

        let (output, _) = session("2\n144\n", quiet());
        assert!(output.contains("144 is a Fibonacci number"));
    }

    #[test]
    fn invalid_selection_pauses_and_prompts_again() {
        let (output, recorder) = session("7\n1\n10\n", quiet());
        assert!(output.contains("Invalid input '7'"));
        assert!(output.contains("The 10th Fibonacci number is 55."));
        assert_eq!(recorder.pauses, vec![Duration::from_millis(5)]);
        assert_eq!(output.matches(MENU_PROMPT).count(), 2);
    }

    #[test]
    fn domain_and_parse_errors_are_rejected() {
        let (output, recorder) = session("1\n-4\n2\nabc\n2\n0\n3\n", quiet());
        assert!(output.contains("rank must be non-negative, got -4"));
        assert!(output.contains("Could not parse 'abc'"));
        assert!(output.contains("value must be a positive finite number, got 0"));
        assert_eq!(recorder.pauses.len(), 3);
    }

    #[test]
    fn quit_and_end_of_input() {
        let (output, _) = session("3\n1\n5\n", quiet());
        assert_eq!(output, MENU_PROMPT);

        let (output, _) = session("", quiet());
        assert_eq!(output, MENU_PROMPT);

        let (output, _) = session("1\n", quiet());
        assert!(output.ends_with(RANKS_PROMPT));
    }

    #[test]
    fn timing_report_precedes_results() {
        let settings = Settings {
            iterations: 10,
            ..quiet()
        };
        let mut out = Vec::new();
        rank_lookup(&mut out, "3", &settings).unwrap();
        let output = String::from_utf8(out).unwrap();

        let banner = output.find("ELAPSED TIME:").unwrap();
        let result = output.find("The 3rd Fibonacci number is 2.").unwrap();
        assert!(banner < result);
        assert!(output.contains(" SECONDS"));
    }

    #[test]
    fn no_timing_report_without_iterations() {
        let mut out = Vec::new();
        super::nearest_lookup(&mut out, "1", &quiet()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 is a Fibonacci number\n");
    }

    #[test]
    fn console_clear_can_be_disabled() {
        let mut out = Vec::new();
        Console { clear_screen: false }.clear(&mut out).unwrap();
        assert!(out.is_empty());
        Console { clear_screen: true }.clear(&mut out).unwrap();
        assert_eq!(out, b"\x1B[2J\x1B[1;1H");
    }
}
