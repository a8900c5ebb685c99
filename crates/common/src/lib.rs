//! Shared building blocks for the catalog binaries: logging bootstrap and
//! small response types reused across crates.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn status_body_serializes_flat() {
        let body = serde_json::to_value(types::StatusBody::ok()).unwrap();
        assert_eq!(body["status"], "ok");
    }
}
