//! Static support resource catalog and selection logic

use crate::models::{CrisisResource, EmotionFocus, ResourcePriority, RiskLevel};

/// Maximum resources returned with any single assessment
pub const DISPLAY_LIMIT: usize = 5;

/// The full catalog: general hotlines first, the emergency line last
pub fn catalog() -> Vec<CrisisResource> {
    vec![
        CrisisResource {
            name: "Crisis Services Canada".to_string(),
            phone: "1-833-456-4566".to_string(),
            text: Some("45645".to_string()),
            website: Some("https://www.crisisservicescanada.ca".to_string()),
            availability: "24/7".to_string(),
            description: "National suicide prevention and crisis support line".to_string(),
            priority: ResourcePriority::High,
        },
        CrisisResource {
            name: "Kids Help Phone".to_string(),
            phone: "1-800-668-6868".to_string(),
            text: Some("686868".to_string()),
            website: Some("https://kidshelpphone.ca".to_string()),
            availability: "24/7".to_string(),
            description: "Support for young people, by phone, text or chat".to_string(),
            priority: ResourcePriority::High,
        },
        CrisisResource {
            name: "Hope for Wellness Helpline".to_string(),
            phone: "1-855-242-3310".to_string(),
            text: None,
            website: Some("https://www.hopeforwellness.ca".to_string()),
            availability: "24/7".to_string(),
            description: "Counselling and crisis intervention for Indigenous peoples".to_string(),
            priority: ResourcePriority::Normal,
        },
        CrisisResource {
            name: "Emergency Services".to_string(),
            phone: "911".to_string(),
            text: None,
            website: None,
            availability: "24/7".to_string(),
            description: "Call immediately if you or someone else is in immediate danger"
                .to_string(),
            priority: ResourcePriority::Immediate,
        },
    ]
}

/// Focus-specific entries
fn for_focus(focus: EmotionFocus) -> Vec<CrisisResource> {
    match focus {
        EmotionFocus::Anxiety => vec![CrisisResource {
            name: "Anxiety Canada".to_string(),
            phone: "1-604-620-0744".to_string(),
            text: None,
            website: Some("https://www.anxietycanada.com".to_string()),
            availability: "Business hours".to_string(),
            description: "Anxiety education, self-help tools and programs".to_string(),
            priority: ResourcePriority::Normal,
        }],
        EmotionFocus::Depression => vec![CrisisResource {
            name: "Canadian Mental Health Association".to_string(),
            phone: "1-833-456-4566".to_string(),
            text: None,
            website: Some("https://cmha.ca".to_string()),
            availability: "24/7".to_string(),
            description: "Mental health programs and local branch referrals".to_string(),
            priority: ResourcePriority::Normal,
        }],
    }
}

/// Build the resource list for an assessment.
///
/// Focus-specific entries join the general catalog; the emergency line
/// is only attached for high risk and sorts first. Duplicates by name
/// are dropped, the result is sorted by priority (stable, so catalog
/// order breaks ties) and capped at [`DISPLAY_LIMIT`].
pub fn for_assessment(risk: RiskLevel, focus: Option<EmotionFocus>) -> Vec<CrisisResource> {
    let mut resources = Vec::new();
    if let Some(focus) = focus {
        resources.extend(for_focus(focus));
    }
    resources.extend(catalog());
    if risk != RiskLevel::High {
        resources.retain(|r| r.priority != ResourcePriority::Immediate);
    }

    let mut seen = std::collections::HashSet::new();
    resources.retain(|r| seen.insert(r.name.clone()));
    resources.sort_by_key(|r| r.priority);
    resources.truncate(DISPLAY_LIMIT);
    resources
}
