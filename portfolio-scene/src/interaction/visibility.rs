use constants::sections::{SECTION_CATALOG, SectionSpec};
use serde_json::Value;

use crate::engine::assets::portfolio_data::PortfolioData;

/// Sections that should get a door, in catalogue order.
///
/// A section qualifies when its field is a non-empty array or an object with
/// at least one key. Missing fields, nulls and scalars count as no data, and a
/// missing document yields no doors at all.
pub fn resolve_visible_sections(data: Option<&PortfolioData>) -> Vec<&'static SectionSpec> {
    let Some(data) = data else {
        return Vec::new();
    };

    SECTION_CATALOG
        .iter()
        .filter(|spec| data.section(spec.key).is_some_and(has_entries))
        .collect()
}

fn has_entries(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::sections::SectionKey;
    use serde_json::json;

    fn keys(data: Option<&PortfolioData>) -> Vec<SectionKey> {
        resolve_visible_sections(data)
            .into_iter()
            .map(|spec| spec.key)
            .collect()
    }

    fn portfolio(value: Value) -> PortfolioData {
        PortfolioData::from_json_value(value).unwrap()
    }

    #[test]
    fn empty_sections_get_no_door() {
        let data = portfolio(json!({
            "skills": ["Go"],
            "experience": [],
            "projects": {},
            "education": [{ "degree": "BS" }],
            "contact": { "email": "a@b.com" }
        }));

        assert_eq!(
            keys(Some(&data)),
            [SectionKey::Skills, SectionKey::Education, SectionKey::Contact]
        );
    }

    #[test]
    fn catalogue_order_wins_over_document_order() {
        let reversed = portfolio(json!({
            "contact": { "email": "a@b.com" },
            "education": ["BS"],
            "projects": ["scanner"],
            "experience": [{ "title": "Engineer" }],
            "skills": ["Rust"]
        }));

        assert_eq!(
            keys(Some(&reversed)),
            [
                SectionKey::Skills,
                SectionKey::Experience,
                SectionKey::Projects,
                SectionKey::Education,
                SectionKey::Contact,
            ]
        );
    }

    #[test]
    fn scalars_and_nulls_count_as_no_data() {
        let data = portfolio(json!({
            "skills": "Rust, Go",
            "experience": 3,
            "projects": null,
            "education": true,
            "contact": { "email": "a@b.com" },
            "personalInfo": { "name": "Ada" },
            "settings": { "photoPosition": "center" }
        }));

        assert_eq!(keys(Some(&data)), [SectionKey::Contact]);
    }

    #[test]
    fn missing_document_yields_no_doors() {
        assert!(keys(None).is_empty());
        assert!(keys(Some(&PortfolioData::default())).is_empty());
    }

    #[test]
    fn door_exists_exactly_when_section_has_entries() {
        let shapes = [
            (json!([]), false),
            (json!({}), false),
            (json!(null), false),
            (json!(""), false),
            (json!(0), false),
            (json!(["x"]), true),
            (json!({ "k": "v" }), true),
            (json!([[]]), true),
        ];

        for spec in SECTION_CATALOG {
            for (shape, expected) in &shapes {
                let mut document = serde_json::Map::new();
                document.insert(spec.key.as_str().to_string(), shape.clone());
                let data = portfolio(Value::Object(document));
                assert_eq!(
                    keys(Some(&data)).contains(&spec.key),
                    *expected,
                    "{} = {shape}",
                    spec.key.as_str()
                );
            }
        }
    }
}
