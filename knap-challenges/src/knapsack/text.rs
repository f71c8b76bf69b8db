use super::{Problem, Solution};
use anyhow::{anyhow, Context, Result};
use std::{fmt, str::FromStr};

struct Token<'a> {
    line: usize,
    text: &'a str,
}

impl Token<'_> {
    fn parse<T: FromStr>(&self, field: &str) -> Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.text
            .parse::<T>()
            .with_context(|| format!("line {}: invalid {} '{}'", self.line, field, self.text))
    }
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    input
        .lines()
        .enumerate()
        .flat_map(|(i, line)| {
            line.split_whitespace()
                .map(move |text| Token { line: i + 1, text })
        })
        .collect()
}

/// Parses the problem text format:
///
/// ```text
/// <item_count> <capacity>
/// <value_1> <weight_1>
/// ...
/// <value_n> <weight_n>
/// ```
impl FromStr for Problem {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let tokens = tokenize(input);
        let mut tokens = tokens.iter();

        let item_count: usize = tokens
            .next()
            .ok_or_else(|| anyhow!("Empty problem input"))?
            .parse("item count")?;
        let capacity: u64 = tokens
            .next()
            .ok_or_else(|| anyhow!("Missing capacity after item count"))?
            .parse("capacity")?;

        // item_count is untrusted; never reserve more than the input can fill
        let reserve = item_count.min(tokens.len() / 2);
        let mut values: Vec<u64> = Vec::with_capacity(reserve);
        let mut weights: Vec<u64> = Vec::with_capacity(reserve);
        for i in 0..item_count {
            let value = tokens
                .next()
                .ok_or_else(|| anyhow!("Expected {} items, found {}", item_count, i))?;
            let weight = tokens
                .next()
                .ok_or_else(|| anyhow!("Item {} is missing its weight", i))?;
            values.push(value.parse("value")?);
            weights.push(weight.parse("weight")?);
        }

        if let Some(extra) = tokens.next() {
            return Err(anyhow!(
                "line {}: unexpected trailing token '{}' after {} items",
                extra.line,
                extra.text,
                item_count
            ));
        }

        Problem::new(&values, &weights, capacity)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.num_items(), self.capacity())?;
        for item in self.items() {
            write!(f, "\n{} {}", item.value(), item.weight())?;
        }
        Ok(())
    }
}

/// Renders the solution text format:
///
/// ```text
/// <total_value> <is_optimal (0|1)>
/// <taken_1> <taken_2> ... <taken_n>
/// ```
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.total_value, self.is_optimal as u8)?;
        let bits: Vec<&str> = self
            .taken
            .iter()
            .map(|&taken| if taken { "1" } else { "0" })
            .collect();
        write!(f, "{}", bits.join(" "))
    }
}

impl FromStr for Solution {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut lines = input.lines().filter(|line| !line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| anyhow!("Empty solution input"))?;
        let header = tokenize(header);
        if header.len() != 2 {
            return Err(anyhow!(
                "Solution header must be '<total_value> <is_optimal>', got {} tokens",
                header.len()
            ));
        }
        let total_value: u64 = header[0].parse("total value")?;
        let is_optimal = parse_bit(header[1].text).context("invalid optimality flag")?;

        let taken = match lines.next() {
            Some(line) => line
                .split_whitespace()
                .enumerate()
                .map(|(i, bit)| parse_bit(bit).with_context(|| format!("selection entry {}", i)))
                .collect::<Result<Vec<bool>>>()?,
            None => Vec::new(),
        };
        if let Some(extra) = lines.next() {
            return Err(anyhow!("Unexpected trailing line '{}'", extra));
        }

        Ok(Solution {
            taken,
            total_value,
            is_optimal,
        })
    }
}

fn parse_bit(text: &str) -> Result<bool> {
    match text {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(anyhow!("expected 0 or 1, got '{}'", text)),
    }
}
