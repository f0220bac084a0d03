//! Controlador del formulario para la terminal
//!
//! Traduce líneas de texto en comandos sobre el formulario y escribe el
//! resultado en cualquier `io::Write`.

use std::io::Write;
use std::str::FromStr;

use crate::cache::draft_store::DraftStore;
use crate::models::registration::FieldName;
use crate::services::form_draft::FormDraft;
use crate::utils::errors::FormError;
use crate::utils::input_mask::apply_date_mask;

pub const HELP: &str = "\
Команды:
  <поле>=<значение>   изменить поле (auto_number, auto_type, date, fullname,
                      pass_series, pass_number, who_gived, when_gived)
  touch <поле>        отметить поле как посещённое
  show                показать форму
  submit              отправить
  cancel              отменить и очистить черновик
  help                эта справка
  quit                выход";

pub const DATE_HINT: &str = "дата прибытия вводится как ГГГГ-ММ-ДД";

/// Comando de la terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Change { field: FieldName, value: String },
    Touch(FieldName),
    Show,
    Submit,
    Cancel,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = FormError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();

        match line.trim_end() {
            "show" => return Ok(Command::Show),
            "submit" => return Ok(Command::Submit),
            "cancel" => return Ok(Command::Cancel),
            "help" => return Ok(Command::Help),
            "quit" | "exit" => return Ok(Command::Quit),
            _ => {}
        }

        if let Some(name) = line.strip_prefix("touch ") {
            return Ok(Command::Touch(name.trim().parse()?));
        }

        match line.split_once('=') {
            Some((name, value)) => Ok(Command::Change {
                field: name.trim().parse()?,
                value: value.to_string(),
            }),
            None => Err(FormError::UnknownCommand(line.trim_end().to_string())),
        }
    }
}

/// Resultado de un comando
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

pub struct FormController<S: DraftStore> {
    form: FormDraft<S>,
}

impl<S: DraftStore> FormController<S> {
    pub fn new(form: FormDraft<S>) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &FormDraft<S> {
        &self.form
    }

    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Outcome, FormError> {
        match command {
            Command::Change { field, value } => {
                // La fecha de expedición llega siempre a través de la máscara
                let value = if field == FieldName::IssueDate {
                    apply_date_mask(&value)
                } else {
                    value
                };
                match self.form.change(field, &value) {
                    Ok(()) => self.write_field(field, out)?,
                    Err(FormError::InvalidDate(text)) => {
                        writeln!(out, "⚠️ {}: {:?} ({})", field.label(), text, DATE_HINT)?;
                    }
                    Err(e) => return Err(e),
                }
            }
            Command::Touch(field) => {
                self.form.touch(field);
                self.write_field(field, out)?;
            }
            Command::Show => self.write_form(out)?,
            Command::Submit => match self.form.submit() {
                Ok(finalized) => {
                    writeln!(out, "✅ Данные отправлены:")?;
                    writeln!(out, "{}", finalized.render()?)?;
                }
                Err(FormError::Validation(_)) => {
                    writeln!(out, "❌ Исправьте ошибки:")?;
                    self.write_errors(out)?;
                }
                Err(e) => return Err(e),
            },
            Command::Cancel => {
                self.form.cancel();
                writeln!(out, "🧹 Форма очищена")?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Outcome::Exit),
        }

        Ok(Outcome::Continue)
    }

    fn write_field<W: Write>(&self, field: FieldName, out: &mut W) -> Result<(), FormError> {
        let value = self.form.record().stored_value(field);
        match self.form.visible_error(field) {
            Some(error) => writeln!(out, "{}: {:?} ⚠️ {}", field.label(), value, error.message)?,
            None => writeln!(out, "{}: {:?}", field.label(), value)?,
        }
        Ok(())
    }

    fn write_errors<W: Write>(&self, out: &mut W) -> Result<(), FormError> {
        for (field, error) in self.form.visible_errors() {
            writeln!(out, "  {}: {}", field.label(), error.message)?;
        }
        Ok(())
    }

    fn write_form<W: Write>(&self, out: &mut W) -> Result<(), FormError> {
        writeln!(out, "Транспортные средства и водители")?;
        for field in FieldName::ALL {
            self.write_field(field, out)?;
        }
        writeln!(out, "Ошибок: {}", self.form.error_count())?;
        Ok(())
    }
}
