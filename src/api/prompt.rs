use std::io::{BufRead, Write};

use tracing::debug;

use crate::core::{
    ItemPass, PersonItems, Result, SplitError, check_people_count, parse_amounts,
};

pub trait ItemSource {
    fn items(&mut self, person: usize, pass: ItemPass) -> Result<Vec<f64>>;
}

/// Reads answers line by line, writing each question to `writer` first.
pub struct PromptSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Returns `None` once the input is exhausted.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        writeln!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_required(&mut self, prompt: &str, field: &str) -> Result<String> {
        match self.ask(prompt)? {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Err(SplitError::config(format!("{field} is required"))),
        }
    }

    pub fn ask_total(&mut self) -> Result<f64> {
        let answer = self.ask_required("Enter the total amount of the bill:", "total")?;
        parse_single(&answer, "total")
    }

    pub fn ask_subtotal(&mut self) -> Result<f64> {
        let answer = self.ask_required(
            "Enter the subtotal (before tax) of the bill:",
            "subtotal",
        )?;
        parse_single(&answer, "subtotal")
    }

    pub fn ask_people(&mut self) -> Result<usize> {
        let answer = self.ask_required(
            "Enter the number of people involved in the transaction:",
            "people count",
        )?;
        answer.parse::<usize>().map_err(|_| {
            SplitError::config(format!(
                "people count must be a whole number, got '{answer}'"
            ))
        })
    }
}

impl<R: BufRead, W: Write> ItemSource for PromptSource<R, W> {
    fn items(&mut self, person: usize, pass: ItemPass) -> Result<Vec<f64>> {
        let prompt = match pass {
            ItemPass::Individual => format!(
                "Enter individual item prices separated by space for person {}:",
                person + 1
            ),
            ItemPass::Excluded => format!("Enter items to exclude from person {}:", person + 1),
        };
        let Some(answer) = self.ask(&prompt)? else {
            return Err(SplitError::config(format!(
                "input ended before prices for person {} were entered",
                person + 1
            )));
        };
        parse_amounts(&answer)
    }
}

fn parse_single(answer: &str, field: &str) -> Result<f64> {
    let values = parse_amounts(answer)?;
    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(SplitError::config(format!(
            "{field} must be a single number, got '{answer}'"
        ))),
    }
}

/// Price lists passed as repeated command-line flags, one per person.
#[derive(Debug, Default)]
pub struct FlagSource {
    individual: Option<Vec<Vec<f64>>>,
    excluded: Option<Vec<Vec<f64>>>,
}

impl FlagSource {
    pub fn new(individual: &[String], excluded: &[String], people_count: usize) -> Result<Self> {
        Ok(Self {
            individual: parse_flag_lists(individual, people_count, "--items")?,
            excluded: parse_flag_lists(excluded, people_count, "--excluded-items")?,
        })
    }

    pub fn covers(&self, pass: ItemPass) -> bool {
        self.lists(pass).is_some()
    }

    fn lists(&self, pass: ItemPass) -> Option<&Vec<Vec<f64>>> {
        match pass {
            ItemPass::Individual => self.individual.as_ref(),
            ItemPass::Excluded => self.excluded.as_ref(),
        }
    }
}

impl ItemSource for FlagSource {
    fn items(&mut self, person: usize, pass: ItemPass) -> Result<Vec<f64>> {
        self.lists(pass)
            .and_then(|lists| lists.get(person))
            .cloned()
            .ok_or_else(|| {
                SplitError::config(format!("no prices given for person {}", person + 1))
            })
    }
}

fn parse_flag_lists(
    values: &[String],
    people_count: usize,
    flag: &str,
) -> Result<Option<Vec<Vec<f64>>>> {
    if values.is_empty() {
        return Ok(None);
    }
    if values.len() != people_count {
        return Err(SplitError::config(format!(
            "{flag} was given {} times but there are {people_count} people; pass it once per person",
            values.len()
        )));
    }
    values
        .iter()
        .map(|value| parse_amounts(value))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Flag lists for the passes they cover, `fallback` for the rest.
pub struct LayeredSource<F> {
    flags: FlagSource,
    fallback: F,
}

impl<F: ItemSource> LayeredSource<F> {
    pub fn new(flags: FlagSource, fallback: F) -> Self {
        Self { flags, fallback }
    }
}

impl<F: ItemSource> ItemSource for LayeredSource<F> {
    fn items(&mut self, person: usize, pass: ItemPass) -> Result<Vec<f64>> {
        if self.flags.covers(pass) {
            self.flags.items(person, pass)
        } else {
            self.fallback.items(person, pass)
        }
    }
}

/// Individual pass for everyone first, then the exclude pass.
pub fn collect_items<S: ItemSource + ?Sized>(
    source: &mut S,
    people_count: usize,
    individual_mode: bool,
    exclude_mode: bool,
) -> Result<Vec<PersonItems>> {
    if !individual_mode && !exclude_mode {
        return Ok(Vec::new());
    }
    check_people_count(people_count)?;
    let mut items = vec![PersonItems::default(); people_count];
    if individual_mode {
        for (person, entry) in items.iter_mut().enumerate() {
            entry.individual = source.items(person, ItemPass::Individual)?;
            debug!(person, prices = ?entry.individual, "individual items");
        }
    }
    if exclude_mode {
        for (person, entry) in items.iter_mut().enumerate() {
            entry.excluded = source.items(person, ItemPass::Excluded)?;
            debug!(person, prices = ?entry.excluded, "excluded items");
        }
    }
    Ok(items)
}
