use herald_channels::SessionError;

/// HTTP status of a failed REST call, if the API answered at all.
pub fn status_code(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(http_err) => http_err.status_code().map(|s| s.as_u16()),
        _ => None,
    }
}

/// Whether Discord refused the credential itself.
pub fn is_auth_rejection(status: Option<u16>) -> bool {
    matches!(status, Some(401 | 403))
}

/// Map an error from the connectivity check: credential rejections become
/// [`SessionError::Auth`], everything else [`SessionError::Connection`].
pub fn classify_open(err: &serenity::Error) -> SessionError {
    if is_auth_rejection(status_code(err)) {
        SessionError::Auth(err.to_string())
    } else {
        SessionError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(Some(401), true)]
    #[case(Some(403), true)]
    #[case(Some(404), false)]
    #[case(Some(429), false)]
    #[case(Some(502), false)]
    #[case(None, false)]
    fn auth_rejections(#[case] status: Option<u16>, #[case] expected: bool) {
        assert_eq!(is_auth_rejection(status), expected);
    }

    #[test]
    fn non_http_errors_are_connection_failures() {
        let err = serenity::Error::Other("socket closed");
        assert_eq!(status_code(&err), None);
        assert!(matches!(classify_open(&err), SessionError::Connection(_)));
    }
}
