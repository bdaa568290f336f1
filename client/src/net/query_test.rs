use super::*;

#[test]
fn empty_query_leaves_path_untouched() {
    assert_eq!(Query::new().apply("/admin/users"), "/admin/users");
}

#[test]
fn pairs_keep_insertion_order() {
    let query = Query::new().with("page", 2).with("per_page", 20).with("user_type", "customer");
    assert_eq!(query.apply("/admin/users"), "/admin/users?page=2&per_page=20&user_type=customer");
}

#[test]
fn values_are_form_encoded() {
    let query = Query::new().with("search", "ali & sons").with("city", "الرياض");
    assert_eq!(query.encode(), "search=ali+%26+sons&city=%D8%A7%D9%84%D8%B1%D9%8A%D8%A7%D8%B6");
}

#[test]
fn with_opt_skips_missing_values() {
    let query = Query::new()
        .with_opt("latitude", Some(24.5))
        .with_opt::<f64>("radius", None)
        .with_opt("service_id", Some("svc-1"));
    assert_eq!(query.encode(), "latitude=24.5&service_id=svc-1");
}

#[test]
fn collects_from_iterator() {
    let query: Query = [("status", "pending"), ("page", "1")].into_iter().collect();
    assert_eq!(query.encode(), "status=pending&page=1");
    assert!(!query.is_empty());
}

#[test]
fn path_segment_escapes_route_characters() {
    assert_eq!(path_segment("u-42"), "u-42");
    assert_eq!(path_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
    assert_eq!(path_segment("two words+"), "two%20words%2B");
}
