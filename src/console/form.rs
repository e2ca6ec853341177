/// Input fields a panel can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    NewPassword,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Password => "Password",
            Field::NewPassword => "New Password",
        }
    }

    /// Short name used when typing into a field from the terminal.
    pub fn key(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::NewPassword => "new-password",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [Field::Username, Field::Password, Field::NewPassword]
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }

    /// Masked when shown.
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::NewPassword)
    }
}

/// Current values of a panel's inputs. Plain storage, no validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: Vec<(Field, String)>,
}

impl FormState {
    /// Every field starts out empty.
    pub fn new(fields: &[Field]) -> Self {
        Self {
            values: fields.iter().map(|&field| (field, String::new())).collect(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.iter().map(|(field, _)| *field)
    }

    /// Empty for fields the form does not carry.
    pub fn value(&self, field: Field) -> &str {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Returns `false` when the form has no such field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.values.iter_mut().find(|(f, _)| *f == field) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }
}
