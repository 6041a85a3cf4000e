/// Refresh-session state of a user identity.
///
/// The service tracks at most one refresh token per user, so the session
/// lifecycle collapses to three states. Expiry is evaluated lazily at the
/// moment of use; there is no background sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No refresh token stored.
    NoSession,
    /// A refresh token is stored and has not yet expired.
    Active,
    /// A refresh token is stored but its expiry has passed. The token value
    /// remains in the store until logout or the next login overwrites it.
    Expired,
}
