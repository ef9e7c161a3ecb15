//! Static snapshot of the medication categories, served as an MCP resource.
//!
//! The upstream assigns each collection a base64 `Collection:{n}` global id.
//! This snapshot exists so agents can discover category ids without a
//! network round trip; the live list is still available via the
//! `get_collections` tool.

use serde::Serialize;

/// URI under which the snapshot is published
pub const COLLECTIONS_URI: &str = "costplus://collections";

/// One medication category
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionEntry {
    /// Base64-encoded global id, e.g. `Q29sbGVjdGlvbjozMQ==`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// URL slug
    pub slug: &'static str,
}

/// Snapshot of the upstream collections, ordered by numeric id.
pub const COLLECTIONS: &[CollectionEntry] = &[
    CollectionEntry { id: "Q29sbGVjdGlvbjox", name: "All Medications", slug: "all-medications" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoy", name: "Acid Reflux", slug: "acid-reflux" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0", name: "Alcohol Dependence", slug: "alcohol-dependence" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1", name: "Allergies", slug: "allergies" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2", name: "ALS", slug: "als" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3", name: "Angina", slug: "angina" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4", name: "Anti-bacterial", slug: "anti-bacterial" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo5", name: "Anti-fungal", slug: "anti-fungal" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxMA==", name: "Antihyperlipidemic", slug: "antihyperlipidemic" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxMQ==", name: "Anti-Inflammation", slug: "anti-inflammation" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxMg==", name: "Antimalarial", slug: "antimalarial" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxMw==", name: "Anti-Parasitic", slug: "anti-parasitic" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxNA==", name: "Anti-viral", slug: "anti-viral" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxNQ==", name: "Arrhythmia", slug: "arrhythmia" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxNg==", name: "Arthritis", slug: "arthritis" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxNw==", name: "Asthma/COPD", slug: "asthma/copd" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxOA==", name: "Birth Control", slug: "birth-control" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoxOQ==", name: "Blood Thinner", slug: "blood-thinner" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyMA==", name: "Bone Health", slug: "bone-health" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyMQ==", name: "Breast Cancer", slug: "breast-cancer" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyMg==", name: "Burns", slug: "burns" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyMw==", name: "Cancer", slug: "cancer" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyNA==", name: "Chronic Dry Eye", slug: "chronic-dry-eye" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyNQ==", name: "Colonoscopy Preparation", slug: "colonoscopy-preparation" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyNg==", name: "Constipation", slug: "constipation" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyNw==", name: "Cough", slug: "cough" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyOA==", name: "Crohn's Disease", slug: "crohn's-disease" },
    CollectionEntry { id: "Q29sbGVjdGlvbjoyOQ==", name: "Dementia", slug: "dementia" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozMA==", name: "Dental Care", slug: "dental-care" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozMQ==", name: "Diabetes", slug: "diabetes" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozMg==", name: "Diuretic", slug: "diuretic" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozMw==", name: "Endometriosis", slug: "endometriosis" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozNA==", name: "Erectile Dysfunction", slug: "erectile-dysfunction" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozNQ==", name: "Eye Health", slug: "eye-health" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozNg==", name: "Fertility", slug: "fertility" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozNw==", name: "Gallstone", slug: "gallstone" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozOA==", name: "Gastrointestinal", slug: "gastrointestinal" },
    CollectionEntry { id: "Q29sbGVjdGlvbjozOQ==", name: "Glaucoma", slug: "glaucoma" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0MA==", name: "Gout", slug: "gout" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0MQ==", name: "Hair & Skin Health", slug: "hair-&-skin-health" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0Mg==", name: "Heart Failure", slug: "heart-failure" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0Mw==", name: "Heart Health", slug: "heart-health" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0NA==", name: "Hemorrhage", slug: "hemorrhage" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0NQ==", name: "Hemorrhoids", slug: "hemorrhoids" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0Ng==", name: "High Blood Pressure", slug: "high-blood-pressure" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0Nw==", name: "High Cholesterol", slug: "high-cholesterol" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0OA==", name: "High Potassium", slug: "high-potassium" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo0OQ==", name: "HIV", slug: "hiv" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1MA==", name: "Hormone Therapy", slug: "hormone-therapy" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1MQ==", name: "Huntington's Disease", slug: "huntington's-disease" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1Mg==", name: "Hyponatremia", slug: "hyponatremia" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1Mw==", name: "Incontinence", slug: "incontinence" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1NA==", name: "Infection", slug: "infection" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1NQ==", name: "Insomnia", slug: "insomnia" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1Ng==", name: "Iron Overload", slug: "iron-overload" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1Nw==", name: "Kidney Disease", slug: "kidney-disease" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1OA==", name: "Leukemia", slug: "leukemia" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo1OQ==", name: "Low Blood Pressure", slug: "low-blood-pressure" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2MA==", name: "Low Blood Sugar", slug: "low-blood-sugar" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2MQ==", name: "Low Potassium", slug: "low-potassium" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2Mg==", name: "Men's Health", slug: "men's-health" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2Mw==", name: "Mental Health", slug: "mental-health" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2NA==", name: "Migraines", slug: "migraines" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2NQ==", name: "Multiple sclerosis", slug: "multiple-sclerosis" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2Ng==", name: "Muscle Relaxants", slug: "muscle-relaxants" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2Nw==", name: "Musculoskeletal", slug: "musculoskeletal" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2OA==", name: "Nausea", slug: "nausea" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo2OQ==", name: "Neurological", slug: "neurological" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3MA==", name: "Opioid Dependence", slug: "opioid-dependence" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3MQ==", name: "Oral Health", slug: "oral-health" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3Mg==", name: "Organ Transplant", slug: "organ-transplant" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3Mw==", name: "Overactive Bladder", slug: "overactive-bladder" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3NA==", name: "Pain & Inflammation", slug: "pain-&-inflammation" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3NQ==", name: "Pain & Nausea", slug: "pain-&-nausea" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3Ng==", name: "Parkinson's Disease", slug: "parkinson's-disease" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3Nw==", name: "Phenylketonuria", slug: "phenylketonuria" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3OA==", name: "Prostate", slug: "prostate" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo3OQ==", name: "Pulmonary Fibrosis", slug: "pulmonary-fibrosis" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4MA==", name: "Restless Leg Syndrome", slug: "restless-leg-syndrome" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4MQ==", name: "Rheumatoid Arthritis", slug: "rheumatoid-arthritis" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4Mg==", name: "Seizures", slug: "seizures" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4Mw==", name: "Sleep Aid", slug: "sleep-aid" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4NA==", name: "Smoking Cessation", slug: "smoking-cessation" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4NQ==", name: "Steroid", slug: "steroid" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4Ng==", name: "Stroke Prevention", slug: "stroke-prevention" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4Nw==", name: "Thrombocytopenia", slug: "thrombocytopenia" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4OA==", name: "Thyroid", slug: "thyroid" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo4OQ==", name: "Urea Cycle Disorders", slug: "urea-cycle-disorders" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo5MA==", name: "Urinary Symptoms", slug: "urinary-symptoms" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo5MQ==", name: "Vascular Disease", slug: "vascular-disease" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo5Mg==", name: "Vitamin Deficiency", slug: "vitamin-deficiency" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo5Mw==", name: "Weight Management", slug: "weight-management" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo5NA==", name: "Wilson Disease", slug: "wilson-disease" },
    CollectionEntry { id: "Q29sbGVjdGlvbjo5NQ==", name: "Women's Health", slug: "women's-health" },
];

/// Filters the snapshot by a case-insensitive substring of name or slug.
///
/// An empty query returns the whole snapshot.
#[must_use]
pub fn search(query: &str) -> Vec<&'static CollectionEntry> {
    let needle = query.trim().to_lowercase();
    COLLECTIONS
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.slug.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Renders one entry in the line-based text form used for resource reads
#[must_use]
pub fn render_entry(entry: &CollectionEntry) -> String {
    format!(
        "ID: {}\nName: {}\nSlug: {}\nCategory: Medication Collection",
        entry.id, entry.name, entry.slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    #[test]
    fn snapshot_covers_all_known_categories() {
        assert_eq!(COLLECTIONS.len(), 94);
    }

    #[test]
    fn ids_decode_to_numbered_collection_form() {
        for entry in COLLECTIONS {
            let decoded = BASE64.decode(entry.id).unwrap();
            let decoded = String::from_utf8(decoded).unwrap();
            let suffix = decoded.strip_prefix("Collection:").unwrap();
            assert!(suffix.parse::<u32>().is_ok(), "bad id for {}", entry.name);
        }
    }

    #[test]
    fn search_matches_name_and_slug_case_insensitively() {
        let heart = search("HEART");
        let names: Vec<&str> = heart.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Heart Failure", "Heart Health"]);

        let by_slug = search("high-blood");
        assert_eq!(by_slug.len(), 1);
        assert_eq!(by_slug[0].name, "High Blood Pressure");
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(search("").len(), COLLECTIONS.len());
    }

    #[test]
    fn diabetes_entry_matches_the_documented_id() {
        let diabetes = search("diabetes");
        assert_eq!(diabetes.len(), 1);
        assert_eq!(diabetes[0].id, "Q29sbGVjdGlvbjozMQ==");
    }
}
