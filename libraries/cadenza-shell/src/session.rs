//! Listener and admin sessions: registration, login, profile edits.

use cadenza_core::validate::{ensure_passwords_match, validate_email, validate_password};
use cadenza_core::{Admin, CadenzaError, Listener, Result};
use cadenza_storage::{auth, listeners, pictures, playlists};
use sqlx::SqlitePool;
use tracing::info;

/// Registration form fields.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub confirmation: String,
}

/// The signed-in account, if any.
#[derive(Debug, Default)]
pub struct Session {
    listener: Option<Listener>,
    admin: Option<Admin>,
}

impl Session {
    /// Create a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The signed-in listener, if any.
    pub fn listener(&self) -> Option<&Listener> {
        self.listener.as_ref()
    }

    /// The signed-in admin, if any.
    pub fn admin(&self) -> Option<&Admin> {
        self.admin.as_ref()
    }

    /// Sign out.
    pub fn logout(&mut self) {
        self.listener = None;
        self.admin = None;
    }

    /// Register a listener account.
    ///
    /// Validates the form, hashes the password, binds the default profile
    /// picture, and auto-creates the "Favorites" playlist. The new account
    /// is returned but not signed in (registration hands off to login).
    pub async fn register(&self, pool: &SqlitePool, form: &RegistrationForm) -> Result<Listener> {
        if form.name.is_empty()
            || form.email.is_empty()
            || form.password.is_empty()
            || form.confirmation.is_empty()
        {
            return Err(CadenzaError::validation("Fill in all required fields"));
        }

        validate_email(&form.email)?;

        if listeners::get_by_email(pool, &form.email).await.map_err(CadenzaError::from)?.is_some() {
            return Err(CadenzaError::validation(
                "A listener with this email already exists",
            ));
        }

        ensure_passwords_match(&form.password, &form.confirmation)?;
        validate_password(&form.password)?;

        let picture = pictures::default_profile_picture(pool)
            .await
            .map_err(CadenzaError::from)?;

        let listener = listeners::create(
            pool,
            listeners::CreateListener {
                name: form.name.clone(),
                email: form.email.clone(),
                password_hash: auth::sha256_hex(&form.password),
                profile_picture_id: picture.id,
            },
        )
        .await
        .map_err(CadenzaError::from)?;

        playlists::create_for_listener(pool, listener.id)
            .await
            .map_err(CadenzaError::from)?;

        info!(listener = listener.id, "registered listener");
        Ok(listener)
    }

    /// Sign a listener in by email and password.
    ///
    /// Banned accounts are refused with a notice; a wrong password or an
    /// unknown email surfaces inline.
    pub async fn login(
        &mut self,
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<&Listener> {
        if email.is_empty() || password.is_empty() {
            return Err(CadenzaError::validation("Fill in all required fields"));
        }

        validate_email(email)?;
        validate_password(password)?;

        let Some(listener) = listeners::get_by_email(pool, email)
            .await
            .map_err(CadenzaError::from)?
        else {
            return Err(CadenzaError::not_found("Listener", email));
        };

        if listener.banned {
            return Err(CadenzaError::Banned(
                "Your account has been temporarily banned; wait for it to be lifted".to_string(),
            ));
        }

        if !auth::verify_password(password, &listener.password_hash) {
            return Err(CadenzaError::validation("Incorrect password"));
        }

        info!(listener = listener.id, "listener signed in");
        self.admin = None;
        Ok(&*self.listener.insert(listener))
    }

    /// Sign an admin in by login and password.
    pub async fn login_admin(
        &mut self,
        pool: &SqlitePool,
        login: &str,
        password: &str,
    ) -> Result<&Admin> {
        if login.is_empty() || password.is_empty() {
            return Err(CadenzaError::validation("Fill in all required fields"));
        }

        let Some(admin) = cadenza_storage::admins::get_by_login(pool, login)
            .await
            .map_err(CadenzaError::from)?
        else {
            return Err(CadenzaError::not_found("Admin", login));
        };

        if !auth::verify_password(password, &admin.password_hash) {
            return Err(CadenzaError::validation("Incorrect password"));
        }

        info!(admin = admin.id, "admin signed in");
        self.listener = None;
        Ok(&*self.admin.insert(admin))
    }

    /// Change the signed-in listener's password.
    pub async fn change_password(
        &mut self,
        pool: &SqlitePool,
        current: &str,
        new_password: &str,
        confirmation: &str,
    ) -> Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| CadenzaError::validation("Not signed in"))?;

        if !auth::verify_password(current, &listener.password_hash) {
            return Err(CadenzaError::validation("Current password is incorrect"));
        }

        ensure_passwords_match(new_password, confirmation)?;
        validate_password(new_password)?;

        let new_hash = auth::sha256_hex(new_password);
        listeners::set_password_hash(pool, listener.id, &new_hash)
            .await
            .map_err(CadenzaError::from)?;

        if let Some(listener) = self.listener.as_mut() {
            listener.password_hash = new_hash;
        }
        Ok(())
    }

    /// Update the signed-in listener's profile. `new_picture_path` is the
    /// already-stored image path (see `cadenza_storage::files`); passing
    /// it appends a picture row and repoints the account.
    pub async fn update_profile(
        &mut self,
        pool: &SqlitePool,
        name: &str,
        email: &str,
        new_picture_path: Option<&str>,
    ) -> Result<&Listener> {
        let listener_id = self
            .listener
            .as_ref()
            .map(|l| l.id)
            .ok_or_else(|| CadenzaError::validation("Not signed in"))?;

        if name.is_empty() {
            return Err(CadenzaError::validation("Name cannot be empty"));
        }
        validate_email(email)?;

        let updated = listeners::update_profile(pool, listener_id, name, email, new_picture_path)
            .await
            .map_err(CadenzaError::from)?;

        Ok(&*self.listener.insert(updated))
    }
}
