/// Replaces every `@key@` placeholder in `template` with its value.
///
/// The template is scanned once, so substituted values are never searched
/// for placeholders. Placeholders without a matching key are left untouched.
#[must_use]
pub fn render_from_template<K, V>(template: &str, values: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('@') {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after.find('@').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(candidate, _)| AsRef::<str>::as_ref(candidate) == key)
                .map(|(_, value)| (end, AsRef::<str>::as_ref(value)))
        });
        match value {
            Some((end, value)) => {
                rendered.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                rendered.push('@');
                rest = after;
            }
        }
    }
    rendered.push_str(rest);
    rendered
}
