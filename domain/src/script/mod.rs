//! Script module domain types
//!
//! A game script is a Lua file that populates the `lutro` namespace table.
//! These types name the pieces of that table the host cares about; the
//! runtime that reads them lives in the infrastructure layer.

pub mod search_path;

/// Optional callbacks a script may define on its module table.
///
/// `Conf` and `Load` run once during script load; `Update` and `Draw` run
/// once per frame, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookName {
    /// `conf(settings)`: mutate the exposed settings table before rendering starts.
    Conf,
    /// `load()`: one-time setup after rendering is initialized.
    Load,
    /// `update(delta)`: advance game state by `delta` seconds.
    Update,
    /// `draw()`: render the current game state.
    Draw,
}

impl HookName {
    /// Field name on the script module (`lutro.update`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conf => "conf",
            Self::Load => "load",
            Self::Update => "update",
            Self::Draw => "draw",
        }
    }
}

impl std::fmt::Display for HookName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field names the host writes into the script module after loading.
pub mod fields {
    pub const PATH: &str = "path";
    pub const CAMERA_X: &str = "camera_x";
    pub const CAMERA_Y: &str = "camera_y";
    pub const SETTINGS: &str = "settings";
}
