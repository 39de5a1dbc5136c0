use std::fmt;

// === DomError ===

/// Errors raised by document tree mutations and lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum DomError {
    /// The node id does not belong to this document.
    InvalidNode(usize),
    /// The operation requires an element node.
    NotAnElement(usize),
    /// The node cannot hold children (text nodes).
    CannotHaveChildren(usize),
    /// The mutation would make a node its own ancestor.
    HierarchyCycle(usize),
    /// A required structural element (head, body) is missing.
    MissingElement(String),
    /// The HTML source could not be parsed.
    Parse(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::InvalidNode(id) => write!(f, "Invalid node: {}", id),
            DomError::NotAnElement(id) => write!(f, "Node is not an element: {}", id),
            DomError::CannotHaveChildren(id) => write!(f, "Node cannot have children: {}", id),
            DomError::HierarchyCycle(id) => write!(f, "Insertion would create a cycle at node {}", id),
            DomError::MissingElement(name) => write!(f, "Document has no <{}> element", name),
            DomError::Parse(msg) => write!(f, "HTML parse error: {}", msg),
        }
    }
}

impl std::error::Error for DomError {}

// === SelectorError ===

/// Errors raised while parsing a CSS selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorError {
    /// The selector string is empty.
    Empty,
    /// The selector contains syntax this matcher does not understand.
    Unsupported(String),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "Empty selector"),
            SelectorError::Unsupported(sel) => write!(f, "Unsupported selector: {}", sel),
        }
    }
}

impl std::error::Error for SelectorError {}

// === PreferenceError ===

/// Errors related to the persisted preference store.
#[derive(Debug)]
pub enum PreferenceError {
    /// Database operation failed.
    DatabaseError(String),
    /// Stored value could not be interpreted.
    InvalidValue(String),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceError::DatabaseError(msg) => write!(f, "Preference database error: {}", msg),
            PreferenceError::InvalidValue(msg) => write!(f, "Invalid preference value: {}", msg),
        }
    }
}

impl std::error::Error for PreferenceError {}

impl From<rusqlite::Error> for PreferenceError {
    fn from(err: rusqlite::Error) -> Self {
        PreferenceError::DatabaseError(err.to_string())
    }
}

// === SettingsError ===

/// Errors related to enhancer settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// File I/O operation failed.
    IoError(String),
    /// JSON serialization or deserialization failed.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === SpeechError ===

/// Errors reported by the speech synthesis capability.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechError {
    /// There is no readable text on the page.
    NothingToRead,
    /// The synthesis engine rejected the request.
    Engine(String),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::NothingToRead => write!(f, "No readable content on page"),
            SpeechError::Engine(msg) => write!(f, "Speech engine error: {}", msg),
        }
    }
}

impl std::error::Error for SpeechError {}

// === CommandError ===

/// Errors raised while decoding a command request.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The action identifier is not recognized.
    UnknownAction(String),
    /// A required parameter is absent or has the wrong type.
    MissingParam(String),
    /// A parameter value is outside the accepted set.
    InvalidParam(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownAction(_) => write!(f, "unknown action"),
            CommandError::MissingParam(name) => write!(f, "missing {}", name),
            CommandError::InvalidParam(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

// === DeliveryError ===

/// Errors on the popup side of the messaging channel.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryError {
    /// No content script is listening in the target page.
    NoReceiver,
    /// Script or stylesheet injection into the page failed.
    InjectionFailed(String),
    /// The channel carried a malformed message.
    Malformed(String),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::NoReceiver => write!(f, "Could not establish connection. Receiving end does not exist."),
            DeliveryError::InjectionFailed(msg) => write!(f, "Content script injection failed: {}", msg),
            DeliveryError::Malformed(msg) => write!(f, "Malformed message: {}", msg),
        }
    }
}

impl std::error::Error for DeliveryError {}

// === EnhancerError ===

/// Any failure surfaced at the command dispatch boundary.
#[derive(Debug)]
pub enum EnhancerError {
    Command(CommandError),
    Dom(DomError),
    Selector(SelectorError),
    Preference(PreferenceError),
    Speech(SpeechError),
    /// An applier rejected its input.
    InvalidInput(String),
}

impl fmt::Display for EnhancerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnhancerError::Command(e) => write!(f, "{}", e),
            EnhancerError::Dom(e) => write!(f, "{}", e),
            EnhancerError::Selector(e) => write!(f, "{}", e),
            EnhancerError::Preference(e) => write!(f, "{}", e),
            EnhancerError::Speech(e) => write!(f, "{}", e),
            EnhancerError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EnhancerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnhancerError::Command(e) => Some(e),
            EnhancerError::Dom(e) => Some(e),
            EnhancerError::Selector(e) => Some(e),
            EnhancerError::Preference(e) => Some(e),
            EnhancerError::Speech(e) => Some(e),
            EnhancerError::InvalidInput(_) => None,
        }
    }
}

impl From<CommandError> for EnhancerError {
    fn from(err: CommandError) -> Self {
        EnhancerError::Command(err)
    }
}

impl From<DomError> for EnhancerError {
    fn from(err: DomError) -> Self {
        EnhancerError::Dom(err)
    }
}

impl From<SelectorError> for EnhancerError {
    fn from(err: SelectorError) -> Self {
        EnhancerError::Selector(err)
    }
}

impl From<PreferenceError> for EnhancerError {
    fn from(err: PreferenceError) -> Self {
        EnhancerError::Preference(err)
    }
}

impl From<SpeechError> for EnhancerError {
    fn from(err: SpeechError) -> Self {
        EnhancerError::Speech(err)
    }
}
