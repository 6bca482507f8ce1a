use std::{
    cell::RefCell,
    io::{self, BufRead, IsTerminal, Write},
};

use anyhow::{Context, Result, anyhow};
use inquire::{CustomUserError, InquireError, Text, validator::Validation};
use meteo_core::{WeatherError, parse_forecast_days, validate_city};

/// Source of answers for the interactive mode.
pub trait Prompter {
    fn city(&self, default: Option<&str>) -> Result<String>;
    fn forecast_days(&self) -> Result<u8>;
}

/// Terminal prompts.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn city(&self, default: Option<&str>) -> Result<String> {
        let mut prompt = Text::new("Enter a city name:");
        if let Some(city) = default {
            prompt = prompt.with_default(city);
        }

        let answer = prompt.prompt().map_err(prompt_error)?;
        Ok(validate_city(&answer)?)
    }

    fn forecast_days(&self) -> Result<u8> {
        // Empty input means "no forecast"; anything invalid re-prompts.
        let answer = Text::new("How many forecast days (0 for none, 1-16)?")
            .with_default("0")
            .with_validator(forecast_days_validator)
            .prompt()
            .map_err(prompt_error)?;

        Ok(parse_forecast_days(&answer)?)
    }
}

/// Terminal prompts when stdin is a TTY, plain line reads when it is piped.
pub fn stdin_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(InquirePrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock()))
    }
}

/// Reads one answer per line, e.g. `printf 'Brno\n3\n' | meteo`.
#[derive(Debug)]
pub struct LinePrompter<R> {
    input: RefCell<R>,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input: RefCell::new(input) }
    }

    /// Next line without its terminator, `None` at end of input.
    fn ask(&self, question: &str) -> Result<Option<String>> {
        eprint!("{question} ");
        let _ = io::stderr().flush();

        let mut line = String::new();
        let read = self
            .input
            .borrow_mut()
            .read_line(&mut line)
            .context("Failed to read answer from stdin")?;

        Ok((read > 0).then(|| line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn city(&self, default: Option<&str>) -> Result<String> {
        let answer = self.ask("Enter a city name:")?.unwrap_or_default();
        let answer = match default {
            Some(city) if answer.trim().is_empty() => city.to_string(),
            _ => answer,
        };

        Ok(validate_city(&answer)?)
    }

    fn forecast_days(&self) -> Result<u8> {
        loop {
            let Some(answer) = self.ask("How many forecast days (0 for none, 1-16)?")? else {
                return Err(WeatherError::validation("No forecast days entered.").into());
            };

            if answer.trim().is_empty() {
                return Ok(0);
            }

            match parse_forecast_days(&answer) {
                Ok(days) => return Ok(days),
                Err(e) => eprintln!("{e}"),
            }
        }
    }
}

fn forecast_days_validator(input: &str) -> Result<Validation, CustomUserError> {
    Ok(match parse_forecast_days(input) {
        Ok(_) => Validation::Valid,
        Err(e) => Validation::Invalid(e.to_string().into()),
    })
}

fn prompt_error(err: InquireError) -> anyhow::Error {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            anyhow!("Cancelled.")
        }
        other => anyhow::Error::new(other).context("Interactive prompt failed"),
    }
}
