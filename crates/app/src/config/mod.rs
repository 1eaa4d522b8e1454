use serde::Deserialize;

/// Raw trailing-window parameters as received from a caller.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WindowParams {
    pub days: Option<String>,
}
