use crate::error::{GameError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::str::FromStr;
use std::time::Duration;

const MAX_DELAY_MS: u64 = 5_000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayOptions
{
    pub seed: Option<u64>,
    pub loss_code: Option<i32>,
    pub delay: Option<Duration>,
}

impl PlayOptions
{
    /// Accepts `--seed`, `--loss-code` and, when `accepts_delay` is set,
    /// `--delay-ms`, each as `--name=value` or `--name value`.
    pub fn from_args(args: &[String], accepts_delay: bool) -> Result<Self>
    {
        let mut options = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (name, inline) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (arg.as_str(), None),
            };
            let mut value = || -> Result<String> {
                match inline.clone() {
                    Some(value) => Ok(value),
                    None => iter
                        .next()
                        .cloned()
                        .ok_or_else(|| GameError::InvalidOption(format!("Expected value after {name}"))),
                }
            };
            match name {
                "--seed" => options.seed = Some(parse_number(name, &value()?)?),
                "--loss-code" => options.loss_code = Some(parse_number(name, &value()?)?),
                "--delay-ms" if accepts_delay => {
                    let ms: u64 = parse_number(name, &value()?)?;
                    if ms > MAX_DELAY_MS {
                        return Err(GameError::InvalidOption(format!(
                            "--delay-ms must be at most {MAX_DELAY_MS}"
                        )));
                    }
                    options.delay = (ms > 0).then_some(Duration::from_millis(ms));
                }
                _ => return Err(GameError::InvalidOption(format!("Unknown option '{arg}'"))),
            }
        }
        Ok(options)
    }

    pub fn rng(&self) -> StdRng
    {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn loss_code_or(&self, default: i32) -> i32
    {
        self.loss_code.unwrap_or(default)
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T>
{
    value
        .parse::<T>()
        .map_err(|_| GameError::InvalidOption(format!("{name} expects a number, got '{value}'")))
}
