use axum::extract::Query;
use axum::http::Uri;
use rotipang_api::routes::params::{OrderListQuery, Pagination, ProductQuery, SortOrder};

fn uri(s: &str) -> Uri {
    s.parse().expect("valid uri")
}

// Parsed through the same extractor the routes use, so a query shape the
// deserializer cannot handle (e.g. integers behind a serde flatten) fails
// here before it fails in production.
#[test]
fn product_query_accepts_pagination_params() {
    let Query(query) =
        Query::<ProductQuery>::try_from_uri(&uri("/api/products?page=2&per_page=5&category=Roti"))
            .expect("query string parses");
    assert_eq!(query.pagination().normalize(), (2, 5, 5));
    assert_eq!(query.category.as_deref(), Some("Roti"));
    assert!(query.q.is_none());
}

#[test]
fn order_list_query_accepts_pagination_and_filters() {
    let Query(query) = Query::<OrderListQuery>::try_from_uri(&uri(
        "/api/admin/orders?page=3&per_page=10&payment_status=paid&sort_order=asc",
    ))
    .expect("query string parses");
    assert_eq!(query.pagination().normalize(), (3, 10, 20));
    assert_eq!(query.payment_status.as_deref(), Some("paid"));
    assert!(query.order_status.is_none());
    assert!(matches!(query.sort_order, Some(SortOrder::Asc)));
}

#[test]
fn missing_params_fall_back_to_defaults() {
    let Query(query) =
        Query::<ProductQuery>::try_from_uri(&uri("/api/products")).expect("empty query parses");
    assert_eq!(query.pagination().normalize(), (1, 20, 0));
}

#[test]
fn normalize_clamps_out_of_range_values() {
    let pagination = Pagination {
        page: Some(0),
        per_page: Some(1000),
    };
    assert_eq!(pagination.normalize(), (1, 100, 0));
}
