//! Coarse classification of HTTP status codes.

/// Reduce a status code to its hundreds floor (`201 -> 200`, `404 -> 400`).
pub fn classify(status: u16) -> u16 {
    status - status % 100
}

/// Returns `true` only for the 2xx group.
///
/// Redirects are not followed into success: a 3xx is a failure here.
pub fn is_success(status: u16) -> bool {
    classify(status) == 200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_floors_to_hundreds() {
        assert_eq!(classify(200), 200);
        assert_eq!(classify(201), 200);
        assert_eq!(classify(299), 200);
        assert_eq!(classify(404), 400);
        assert_eq!(classify(550), 500);
        assert_eq!(classify(99), 0);
        assert_eq!(classify(0), 0);
    }

    #[test]
    fn test_only_2xx_is_success() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(199));
        assert!(!is_success(302));
        assert!(!is_success(404));
        assert!(!is_success(500));
    }
}
