//! Per-row partner derivations: tax id normalization and name splitting.

use super::types::Partner;

/// Strip the country prefix from a tax id.
///
/// `ESB12345678` with country `ES` becomes `B12345678`. A repeated prefix is
/// stripped as a whole, so normalizing twice changes nothing. Ids without the
/// prefix, or partners without a country, keep the id verbatim. A missing id
/// yields an empty string.
pub fn normalize_vat(vat: Option<&str>, country_code: Option<&str>) -> String {
    let Some(vat) = vat else {
        return String::new();
    };
    match country_code {
        Some(cc) if !cc.is_empty() => {
            let mut rest = vat;
            while let Some(stripped) = rest.strip_prefix(cc) {
                rest = stripped;
            }
            rest.to_string()
        }
        _ => vat.to_string(),
    }
}

/// Partner fields as the Glasof import expects them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerProjection {
    pub country_code: String,
    pub vat: String,
    pub lastname: String,
    pub firstname: String,
}

impl PartnerProjection {
    pub fn from_partner(partner: &Partner) -> Self {
        let (lastname, firstname) = split_name(partner);
        Self {
            country_code: partner.country_code.clone().unwrap_or_default(),
            vat: normalize_vat(partner.vat.as_deref(), partner.country_code.as_deref()),
            lastname,
            firstname,
        }
    }
}

/// Split a partner into (last name, first name).
///
/// Contacts of a company are booked under the company name and organizations
/// under their own name, both with an empty first name.
pub fn split_name(partner: &Partner) -> (String, String) {
    if let Some(parent) = &partner.parent {
        (parent.name.clone().unwrap_or_default(), String::new())
    } else if partner.is_company {
        (partner.name.clone(), String::new())
    } else {
        (
            partner.lastname.clone().unwrap_or_default(),
            partner.firstname.clone().unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PartnerRef;

    fn person() -> Partner {
        Partner {
            name: "Lucía Pérez Gómez".into(),
            vat: Some("ES12345678Z".into()),
            country_code: Some("ES".into()),
            is_company: false,
            parent: None,
            firstname: Some("Lucía".into()),
            lastname: Some("Pérez Gómez".into()),
        }
    }

    #[test]
    fn strips_matching_prefix() {
        assert_eq!(normalize_vat(Some("ESB12345678"), Some("ES")), "B12345678");
    }

    #[test]
    fn doubled_prefix_is_stripped_once_and_for_all() {
        let once = normalize_vat(Some("ESESB1234"), Some("ES"));
        assert_eq!(once, "B1234");
        assert_eq!(normalize_vat(Some(&once), Some("ES")), once);
    }

    #[test]
    fn keeps_foreign_prefix() {
        assert_eq!(normalize_vat(Some("FR12345678901"), Some("ES")), "FR12345678901");
    }

    #[test]
    fn no_country_keeps_id() {
        assert_eq!(normalize_vat(Some("B12345678"), None), "B12345678");
        assert_eq!(normalize_vat(Some("ESB12345678"), Some("")), "ESB12345678");
    }

    #[test]
    fn no_vat_is_empty() {
        assert_eq!(normalize_vat(None, Some("ES")), "");
    }

    #[test]
    fn short_ids_survive() {
        assert_eq!(normalize_vat(Some("E"), Some("ES")), "E");
        assert_eq!(normalize_vat(Some("ES"), Some("ES")), "");
    }

    #[test]
    fn person_split() {
        assert_eq!(
            split_name(&person()),
            ("Pérez Gómez".to_string(), "Lucía".to_string())
        );
    }

    #[test]
    fn contact_uses_parent_name() {
        let mut p = person();
        p.parent = Some(PartnerRef {
            name: Some("Viajes Sol S.L.".into()),
        });
        p.is_company = true;
        assert_eq!(split_name(&p), ("Viajes Sol S.L.".to_string(), String::new()));

        p.parent = Some(PartnerRef { name: None });
        assert_eq!(split_name(&p), (String::new(), String::new()));
    }

    #[test]
    fn company_uses_own_name() {
        let mut p = person();
        p.is_company = true;
        p.name = "Hoteles Norte S.A.".into();
        assert_eq!(split_name(&p), ("Hoteles Norte S.A.".to_string(), String::new()));
    }

    #[test]
    fn missing_names_are_empty() {
        let mut p = person();
        p.firstname = None;
        p.lastname = None;
        assert_eq!(split_name(&p), (String::new(), String::new()));
    }

    #[test]
    fn projection() {
        let proj = PartnerProjection::from_partner(&person());
        assert_eq!(proj.country_code, "ES");
        assert_eq!(proj.vat, "12345678Z");
        assert_eq!(proj.firstname, "Lucía");
    }
}
