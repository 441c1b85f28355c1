/// Top-level screen: the login form or the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Login,
    Dashboard,
}

/// Dashboard section currently visible. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveView {
    Summaries,
    Specializations,
}

#[derive(Debug, Clone)]
pub enum LoadingState {
    Idle,
    Loading,
    Complete,
    Error(String),
}

/// Which field of the login form has focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginField {
    Email,
    Password,
}

/// Which field of the upload form has focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UploadField {
    Name,
    Specialization,
    FilePath,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    // Login screen form
    Login,
    // Dashboard navigation
    Normal,
    // Upload-summary form
    Uploading,
    // Add-specialization form
    AddingSpecialization,
    // Y/N confirmation before deleting a summary
    ConfirmDelete { id: i64, name: String },
    // Y/N confirmation before logging out
    ConfirmLogout,
    // Blocking notice that must be dismissed
    Notice,
    // PDF preview modal
    Preview,
}

/// Severity of a notice, controls the modal accent color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    /// Mode to restore when the notice is dismissed, so a notice raised
    /// over an open form returns to that form.
    pub return_mode: InputMode,
}

/// Mutating call currently in flight. At most one runs at a time; the
/// controls that would start another are inert until it finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingOp {
    Login,
    Upload,
    Delete,
    AddSpecialization,
}
