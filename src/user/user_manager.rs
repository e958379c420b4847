use super::{
    auth::CredentialsHasher, permissions::Permission, permissions::UserRole, AuthToken,
    AuthTokenValue, UserAuthCredentials, UserStore, UsernamePasswordCredentials,
};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::time::SystemTime;
use tracing::info;

/// A user as listed by the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserOverview {
    pub handle: String,
    pub role: UserRole,
    pub has_password: bool,
}

pub struct UserManager {
    user_store: Box<dyn UserStore>,
}

impl UserManager {
    pub fn new(user_store: Box<dyn UserStore>) -> Self {
        Self { user_store }
    }

    pub fn add_user<T: AsRef<str>>(&self, user_handle: T) -> Result<usize> {
        let user_handle = user_handle.as_ref();

        if user_handle.is_empty() {
            bail!("The user handle cannot be empty.")
        }

        if self.user_store.get_user_id(user_handle)?.is_some() {
            bail!("User handle already exists.");
        }

        let user_id = self.user_store.create_user(user_handle)?;
        info!("Created user {} with id {}", user_handle, user_id);
        Ok(user_id)
    }

    /// Creates a user that can log in right away with the given role.
    pub fn add_user_with_login(
        &self,
        user_handle: &str,
        password: String,
        role: UserRole,
    ) -> Result<usize> {
        let user_id = self.add_user(user_handle)?;
        self.create_password_credentials(user_handle, password)?;
        self.user_store.set_user_role(user_id, role)?;
        Ok(user_id)
    }

    pub fn get_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        self.user_store.get_user_auth_token(value)
    }

    pub fn update_auth_token_last_used(&self, value: &AuthTokenValue) -> Result<()> {
        self.user_store
            .update_user_auth_token_last_used_timestamp(value)
    }

    pub fn generate_auth_token(&self, credentials: &UserAuthCredentials) -> Result<AuthToken> {
        let token = AuthToken {
            user_id: credentials.user_id,
            value: AuthTokenValue::generate(),
            created: SystemTime::now(),
            last_used: None,
        };
        self.user_store.add_user_auth_token(token.clone())?;
        Ok(token)
    }

    /// Returns the user's credentials when the password matches, Ok(None)
    /// for an unknown user, a user without password, or a wrong password.
    pub fn authenticate(
        &self,
        user_handle: &str,
        password: &str,
    ) -> Result<Option<UserAuthCredentials>> {
        let Some(credentials) = self.user_store.get_user_auth_credentials(user_handle)? else {
            return Ok(None);
        };
        let verified = match &credentials.username_password {
            Some(password_credentials) => password_credentials.verify(password)?,
            None => false,
        };
        Ok(verified.then_some(credentials))
    }

    fn create_hashed_password(
        user_id: usize,
        password: String,
    ) -> Result<UsernamePasswordCredentials> {
        let hasher = CredentialsHasher::Argon2;
        let salt = hasher.generate_b64_salt();
        let hash = hasher.hash(password.as_bytes(), &salt)?;
        Ok(UsernamePasswordCredentials {
            user_id,
            salt,
            hash,
            hasher,
            created: SystemTime::now(),
            last_tried: None,
            last_used: None,
        })
    }

    pub fn create_password_credentials(&self, user_handle: &str, password: String) -> Result<()> {
        let mut credentials = self
            .user_store
            .get_user_auth_credentials(user_handle)?
            .with_context(|| format!("User with handle {} not found.", user_handle))?;
        if credentials.username_password.is_some() {
            bail!("User with handle {} already has password credentials method. Maybe you want to modify it?", user_handle);
        }
        credentials.username_password =
            Some(Self::create_hashed_password(credentials.user_id, password)?);
        self.user_store.update_user_auth_credentials(credentials)
    }

    pub fn update_password_credentials(&self, user_handle: &str, password: String) -> Result<()> {
        let mut credentials = self
            .user_store
            .get_user_auth_credentials(user_handle)?
            .with_context(|| format!("User with handle {} not found.", user_handle))?;
        if credentials.username_password.is_none() {
            bail!(
                "Cannot update password of user with handle {} since it never had one.",
                user_handle
            );
        }
        credentials.username_password =
            Some(Self::create_hashed_password(credentials.user_id, password)?);
        self.user_store.update_user_auth_credentials(credentials)
    }

    pub fn delete_password_credentials(&self, user_handle: &str) -> Result<()> {
        let mut credentials = self
            .user_store
            .get_user_auth_credentials(user_handle)?
            .with_context(|| format!("User with handle {} not found.", user_handle))?;
        credentials.username_password = None;
        self.user_store.update_user_auth_credentials(credentials)
    }

    pub fn get_user_credentials(&self, user_handle: &str) -> Result<Option<UserAuthCredentials>> {
        self.user_store.get_user_auth_credentials(user_handle)
    }

    pub fn delete_auth_token(&self, user_id: usize, token_value: &AuthTokenValue) -> Result<()> {
        match self.user_store.delete_user_auth_token(token_value)? {
            Some(removed) if removed.user_id == user_id => Ok(()),
            Some(removed) => {
                self.user_store.add_user_auth_token(removed.clone())?;
                bail!("Tried to delete auth token {}, but the authenticated user {} was not the owner {} of the token.", token_value.0, user_id, removed.user_id)
            }
            None => bail!("Did not find auth token {}", token_value.0),
        }
    }

    pub fn get_user_tokens(&self, user_handle: &str) -> Result<Vec<AuthToken>> {
        self.user_store.get_all_user_auth_tokens(user_handle)
    }

    pub fn get_all_user_handles(&self) -> Result<Vec<String>> {
        self.user_store.get_all_user_handles()
    }

    pub fn get_user_handle(&self, user_id: usize) -> Result<Option<String>> {
        self.user_store.get_user_handle(user_id)
    }

    pub fn get_user_id(&self, user_handle: &str) -> Result<Option<usize>> {
        self.user_store.get_user_id(user_handle)
    }

    /// Users without an assigned role are viewers.
    pub fn get_user_role(&self, user_id: usize) -> Result<UserRole> {
        Ok(self.user_store.get_user_role(user_id)?.unwrap_or_default())
    }

    pub fn set_user_role(&self, user_handle: &str, role: UserRole) -> Result<()> {
        let user_id = self
            .user_store
            .get_user_id(user_handle)?
            .with_context(|| format!("User with handle {} not found.", user_handle))?;
        self.user_store.set_user_role(user_id, role)?;
        info!("Set role of {} to {}", user_handle, role.as_str());
        Ok(())
    }

    pub fn get_user_permissions(&self, user_id: usize) -> Result<Vec<Permission>> {
        Ok(self.get_user_role(user_id)?.permissions().to_vec())
    }

    pub fn list_users(&self) -> Result<Vec<UserOverview>> {
        let mut users = Vec::new();
        for handle in self.user_store.get_all_user_handles()? {
            let Some(credentials) = self.user_store.get_user_auth_credentials(&handle)? else {
                continue;
            };
            users.push(UserOverview {
                role: self.get_user_role(credentials.user_id)?,
                has_password: credentials.username_password.is_some(),
                handle,
            });
        }
        Ok(users)
    }
}
