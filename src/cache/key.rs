//! Cache Key Derivation
//!
//! Builds the normalized request signature used as the cache key.

// == Cache Key ==
/// Derives the cache key for an upstream request.
///
/// Parameters are sorted by name before being joined, so two mappings holding
/// the same pairs in a different order produce the same key:
///
/// ```
/// use weather_proxy::cache::cache_key;
///
/// let a = [("units", "metric"), ("q", "London")];
/// let b = [("q", "London"), ("units", "metric")];
/// assert_eq!(cache_key("weather", &a), "weather?q=London&units=metric");
/// assert_eq!(cache_key("weather", &a), cache_key("weather", &b));
/// ```
pub fn cache_key<K, V>(endpoint: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();
    // Ties on the name only happen with repeated parameters; order them by value
    // so the key stays deterministic.
    pairs.sort_unstable();

    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", endpoint, query)
}
