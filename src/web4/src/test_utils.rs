use url::form_urlencoded;

pub fn decode_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn assert_has_query_pair(query: &str, key: &str, expected_value: &str) {
    let values = query_values(query, key);
    assert!(
        !values.is_empty(),
        "Should have a {key} parameter with value {expected_value} in {query:?}"
    );
    assert!(
        values.contains(&expected_value.to_string()),
        "Should have a {key} parameter with value {expected_value}. Actual values: {:?}",
        values
    );
}

pub fn assert_lacks_query_key(query: &str, key: &str) {
    let values = query_values(query, key);
    assert!(
        values.is_empty(),
        "Should not have a {key} parameter in {query:?}. Actual values: {:?}",
        values
    );
}

pub fn assert_query_keys(query: &str, expected: &[&str]) {
    let keys: Vec<String> = decode_query(query).into_iter().map(|(k, _)| k).collect();
    pretty_assertions::assert_eq!(
        keys,
        expected.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
        "Mismatch in parameter order in {query:?}"
    );
}

pub fn query_values(query: &str, key: &str) -> Vec<String> {
    decode_query(query)
        .into_iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v)
        .collect()
}
