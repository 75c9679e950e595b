//! Built-in fragment templates.
//!
//! Fragments use the `errata-template` syntax. They see these values:
//!
//! | name        | value                                         |
//! |-------------|-----------------------------------------------|
//! | `message`   | the diagnostic message                        |
//! | `code`      | the code as `E0123`, absent when unset        |
//! | `cause`     | the cause's text, absent when unset           |
//! | `has-cause` | whether a cause is set, even if its text is empty |
//! | `notes`     | list of notes                                 |
//! | `helps`     | list of helps                                 |
//! | `wrapped`   | list of the wrapped errors, already rendered  |
//!
//! plus any extra data set on the diagnostic. Every fragment of a registry is
//! callable from the others as a partial, e.g. `$cause()$`.

use std::fmt;

/// The overridable parts of a rendered diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// `error` / `error[E0123]` before the message.
    MessagePrefix,
    /// The `-->` block under the message.
    Cause,
    /// The `= note:` lines.
    Notes,
    /// The `= help:` lines.
    Helps,
}

impl Fragment {
    pub const ALL: [Fragment; 4] = [
        Fragment::MessagePrefix,
        Fragment::Cause,
        Fragment::Notes,
        Fragment::Helps,
    ];

    /// The partial name of this fragment.
    pub fn as_str(self) -> &'static str {
        match self {
            Fragment::MessagePrefix => "message-prefix",
            Fragment::Cause => "cause",
            Fragment::Notes => "notes",
            Fragment::Helps => "helps",
        }
    }

    /// The built-in template text.
    pub fn default_text(self) -> &'static str {
        match self {
            Fragment::MessagePrefix => MESSAGE_PREFIX,
            Fragment::Cause => CAUSE,
            Fragment::Notes => NOTES,
            Fragment::Helps => HELPS,
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Fragment> for String {
    fn from(fragment: Fragment) -> Self {
        fragment.as_str().to_string()
    }
}

pub const MESSAGE_PREFIX: &str = concat!(
    r#"$if(code)$$code/prepend "error["/append "]"/bold-red$"#,
    r#"$else$$"error"/bold-red$$endif$"#,
);

pub const CAUSE: &str = concat!(
    "$if(has-cause)$\n",
    r#"  $"--> "/bold-blue$$cause/split "\n"/first$"#,
    r#"$for(cause/split "\n"/rest)$"#,
    "\n",
    r#"   $"| "/bold-blue$$it$$endfor$$endif$"#,
);

pub const NOTES: &str = concat!(
    "$for(notes)$\n",
    r#"   $"= "/bold-blue$$"note"/bold$: $it/split "\n"/first$"#,
    r#"$for(it/split "\n"/rest)$"#,
    "\n           $it$$endfor$$endfor$",
);

pub const HELPS: &str = concat!(
    "$for(helps)$\n",
    r#"   $"= "/bold-blue$$"help"/bold-green$: $it/split "\n"/first$"#,
    r#"$for(it/split "\n"/rest)$"#,
    "\n           $it$$endfor$$endfor$",
);

/// Top-level layout composing the fragments. Not overridable.
pub(crate) const LAYOUT: &str = concat!(
    r#"$message-prefix()$$message/prepend ": "/bold$"#,
    "$cause()$$notes()$$helps()$",
    "$for(wrapped)$\n\n$it$$endfor$",
);
