//! Route labels for spans and metrics.

use uuid::Uuid;

/// Path with uuid segments collapsed so per-resource routes share one label.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_uuid_segments() {
        let uuid = Uuid::now_v7();

        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/orders"), "/orders");
        assert_eq!(route_label(&format!("/orders/{uuid}")), "/orders/{uuid}");
        assert_eq!(
            route_label(&format!("/products/{uuid}/restock")),
            "/products/{uuid}/restock"
        );
    }
}
