/// Builds an alert id from the trigger second and the metric name.
///
/// Two alerts for the same metric within the same second produce the same
/// id; the format offers no uniqueness guarantee and downstream consumers
/// must not treat it as a key.
pub fn alert_id(epoch_secs: i64, metric: &str) -> String {
    format!("alert_{epoch_secs}_{metric}")
}
