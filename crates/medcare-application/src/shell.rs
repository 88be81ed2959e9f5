//! Shell controller: the boot gate and the navigational frame.
//!
//! Coordinates the session store with the navigation state so the front
//! end only ever has to ask "what should I render?" and forward user
//! interactions. Navigation state exists exactly while a session does:
//! it is mounted fresh on hydrate/login and discarded on logout.

use std::sync::Arc;

use medcare_core::error::{MedcareError, Result};
use medcare_core::navigation::{MenuOutcome, MenuItem, NavigationState, Page};
use medcare_core::session::SessionStore;
use medcare_core::clinician::Clinician;
use tokio::sync::RwLock;

/// What the front end should render right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellView {
    /// Hydration has not completed yet; show a loading indicator.
    Loading,
    /// No session; show the login form.
    Login,
    /// A session exists; show the navigational shell.
    Shell { current_page: Page },
}

/// Drives the login gate and page routing for one shell instance.
pub struct ShellController {
    session: Arc<SessionStore>,
    navigation: RwLock<Option<NavigationState>>,
}

impl ShellController {
    /// Creates a controller over an explicitly constructed session store.
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            navigation: RwLock::new(None),
        }
    }

    /// Boots the shell: hydrates the session and, if one was restored,
    /// mounts a fresh navigation state.
    pub async fn hydrate(&self) -> Result<()> {
        self.session.hydrate().await?;

        if self.session.is_authenticated().await {
            *self.navigation.write().await = Some(NavigationState::new());
        }

        Ok(())
    }

    /// Resolves the current render branch.
    pub async fn view(&self) -> ShellView {
        if self.session.is_loading() {
            return ShellView::Loading;
        }

        match &*self.navigation.read().await {
            Some(nav) => ShellView::Shell {
                current_page: nav.current_page(),
            },
            None => ShellView::Login,
        }
    }

    /// Attempts a login; on success the shell mounts with default
    /// navigation state (dashboard selected).
    pub async fn login(&self, username: &str, secret: &str) -> Result<bool> {
        if !self.session.login(username, secret).await? {
            return Ok(false);
        }

        *self.navigation.write().await = Some(NavigationState::new());
        Ok(true)
    }

    /// Signs out and unmounts the shell. Idempotent.
    pub async fn logout(&self) -> Result<()> {
        self.session.logout().await?;
        *self.navigation.write().await = None;
        Ok(())
    }

    /// The authenticated clinician, if any.
    pub async fn current_clinician(&self) -> Option<Clinician> {
        self.session.current().await
    }

    /// Opens the page named by `id`.
    ///
    /// Unknown identifiers are rejected with `NotFound`; the render layer
    /// decides whether to fall back to the default page.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id; `Auth` when no shell is mounted.
    pub async fn open_page(&self, id: &str) -> Result<Page> {
        let page = Page::parse(id)?;

        let mut guard = self.navigation.write().await;
        let nav = guard
            .as_mut()
            .ok_or_else(|| MedcareError::auth("not signed in"))?;
        nav.set_current_page(page);
        tracing::debug!(page = %page, "page selected");

        Ok(page)
    }

    /// Flips the sidebar-collapsed flag; returns the new value.
    pub async fn toggle_sidebar(&self) -> Result<bool> {
        let mut guard = self.navigation.write().await;
        let nav = guard
            .as_mut()
            .ok_or_else(|| MedcareError::auth("not signed in"))?;
        Ok(nav.toggle_sidebar())
    }

    /// Toggles the expansion of menu group `id`; returns the new state.
    pub async fn toggle_group(&self, id: &str) -> Result<bool> {
        let mut guard = self.navigation.write().await;
        let nav = guard
            .as_mut()
            .ok_or_else(|| MedcareError::auth("not signed in"))?;
        Ok(nav.toggle_group(id))
    }

    /// Applies the sidebar click behavior for `item`.
    pub async fn activate_menu_item(&self, item: &MenuItem) -> Result<MenuOutcome> {
        let mut guard = self.navigation.write().await;
        let nav = guard
            .as_mut()
            .ok_or_else(|| MedcareError::auth("not signed in"))?;
        Ok(nav.activate(item))
    }

    /// A snapshot of the navigation state, for rendering.
    pub async fn navigation(&self) -> Result<NavigationState> {
        self.navigation
            .read()
            .await
            .clone()
            .ok_or_else(|| MedcareError::auth("not signed in"))
    }
}
