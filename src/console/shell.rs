use tracing::{info, warn};
use uuid::Uuid;

use crate::api::Operation;
use crate::console::panel::Panel;

/// One entry of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    CreateUser,
    GetUser,
    UpdateUser,
    DeleteUser,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::CreateUser,
        Route::GetUser,
        Route::UpdateUser,
        Route::DeleteUser,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::CreateUser => "/",
            Route::GetUser => "/get-user",
            Route::UpdateUser => "/update-user",
            Route::DeleteUser => "/delete-user",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::CreateUser => "Create User",
            Route::GetUser => "Get User",
            Route::UpdateUser => "Update User",
            Route::DeleteUser => "Delete User",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn operation(self) -> Operation {
        match self {
            Route::CreateUser => Operation::Create,
            Route::GetUser => Operation::Read,
            Route::UpdateUser => Operation::Update,
            Route::DeleteUser => Operation::Delete,
        }
    }
}

/// Holds the panel currently on screen. Each mount gets a fresh panel and a
/// fresh id; nothing carries over between mounts.
#[derive(Debug, Clone)]
pub struct Shell {
    route: Route,
    mount_id: Uuid,
    panel: Panel,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::mount(Route::CreateUser)
    }

    fn mount(route: Route) -> Self {
        Self {
            route,
            mount_id: Uuid::new_v4(),
            panel: Panel::new(route.operation()),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn mount_id(&self) -> Uuid {
        self.mount_id
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// Switches panels. Returns `false` when `route` is already showing,
    /// in which case the current panel keeps its state.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.route {
            return false;
        }
        *self = Self::mount(route);
        info!(route = route.path(), mount = %self.mount_id, "navigated");
        true
    }

    pub fn navigate_to_path(&mut self, path: &str) -> bool {
        match Route::from_path(path) {
            Some(route) => self.navigate(route),
            None => {
                warn!(%path, "no panel at this path");
                false
            }
        }
    }
}
