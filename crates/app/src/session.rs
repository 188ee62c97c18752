use time::Duration;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "campus_session";

/// Sessions live for two hours, matching the cookie max-age.
pub const SESSION_TTL: Duration = Duration::hours(2);
