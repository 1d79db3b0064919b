use std::io::{self, BufRead, Write};

use super::layout::{field_specs, FieldSpec, InputKind};
use super::{display_value, required_label};
use crate::form::submission::JobStartTransport;
use crate::form::IntakeForm;

/// Line-oriented editor bound to an [`IntakeForm`]. Each answered line is
/// forwarded to `set_field`; a blank line keeps the current value.
pub struct FormPrompter<R, W> {
    input: R,
    output: W,
}

enum Answer {
    Keep,
    Value(String),
    Closed,
}

impl<R, W> FormPrompter<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Walk every field in section order. Returns the number of edits applied;
    /// stops early if the input is closed.
    pub fn fill<T>(&mut self, form: &IntakeForm<T>) -> io::Result<usize>
    where
        T: JobStartTransport,
    {
        let mut edits = 0;
        for spec in field_specs() {
            let answer = if spec.input == InputKind::Select {
                self.ask_choice(spec, form)?
            } else {
                self.ask_text(spec, form)?
            };

            match answer {
                Answer::Keep => {}
                Answer::Value(raw) => {
                    form.set_field(spec.name, &raw);
                    edits += 1;
                }
                Answer::Closed => break,
            }
        }
        Ok(edits)
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask_text<T: JobStartTransport>(
        &mut self,
        spec: &FieldSpec,
        form: &IntakeForm<T>,
    ) -> io::Result<Answer> {
        let current = display_value(spec, &form.fields());
        write!(self.output, "{} [{current}]: ", required_label(spec))?;
        self.output.flush()?;

        Ok(match self.read_line()? {
            None => Answer::Closed,
            Some(line) if line.is_empty() => Answer::Keep,
            Some(line) => Answer::Value(line),
        })
    }

    fn ask_choice<T: JobStartTransport>(
        &mut self,
        spec: &FieldSpec,
        form: &IntakeForm<T>,
    ) -> io::Result<Answer> {
        let options = spec.name.options().unwrap_or_default();
        writeln!(self.output, "{}", required_label(spec))?;
        let current = form.fields();
        for (index, option) in options.iter().enumerate() {
            let marker = if current.get(spec.name).is_choice(option) {
                "*"
            } else {
                " "
            };
            writeln!(self.output, "  {marker}{}) {option}", index + 1)?;
        }

        loop {
            write!(self.output, "Choose 1-{}: ", options.len())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(Answer::Closed);
            };
            if line.is_empty() {
                return Ok(Answer::Keep);
            }
            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => {
                    return Ok(Answer::Value(options[choice - 1].to_string()));
                }
                _ => writeln!(
                    self.output,
                    "Please choose a number between 1 and {}.",
                    options.len()
                )?,
            }
        }
    }

    /// Next line without its terminator, `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
