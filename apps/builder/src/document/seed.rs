use std::collections::BTreeMap;

use uuid::Uuid;

use crate::document::layout::{Layout, SectionKey, TemplateId};
use crate::document::model::{
    Certification, Education, Experience, Language, PersonalInfo, Project, ResumeDocument, Skills,
    Theme,
};

/// The document every session starts from.
///
/// Item ids are fixed so that two seeds compare equal and render identically.
pub fn seed_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            full_name: Some("John Doe".into()),
            job_title: Some("Software Developer".into()),
            email: Some("john.doe@example.com".into()),
            phone: Some("+1 (555) 123-4567".into()),
            location: Some("San Francisco, CA".into()),
            website: Some("johndoe.dev".into()),
            linkedin: Some("linkedin.com/in/johndoe".into()),
            github: Some("github.com/johndoe".into()),
            profile_image: None,
        },
        summary: "Experienced software developer with 5+ years of expertise in full-stack \
                  development, building scalable web services and mentoring engineering teams."
            .into(),
        skills: Skills {
            technical: strings(&["JavaScript", "React", "Node.js", "Python", "SQL"]),
            soft: strings(&[
                "Leadership",
                "Communication",
                "Problem Solving",
                "Team Collaboration",
            ]),
        },
        experience: vec![Experience {
            id: Uuid::from_u128(0x1001),
            company: "Tech Corp".into(),
            position: "Senior Software Developer".into(),
            location: "San Francisco, CA".into(),
            start_date: "2020-01".into(),
            end_date: "Present".into(),
            current: true,
            achievements: strings(&[
                "Led development of microservices architecture serving 1M+ users",
                "Improved application performance by 40% through optimization",
                "Mentored 5 junior developers and conducted code reviews",
            ]),
        }],
        education: vec![Education {
            id: Uuid::from_u128(0x2001),
            institution: "University of California".into(),
            degree: "Bachelor of Science in Computer Science".into(),
            location: "Berkeley, CA".into(),
            start_date: "2016".into(),
            end_date: "2020".into(),
            gpa: Some("3.8/4.0".into()),
        }],
        projects: vec![Project {
            id: Uuid::from_u128(0x3001),
            name: "E-commerce Platform".into(),
            description: "Full-stack e-commerce solution with React and Node.js".into(),
            technologies: strings(&["React", "Node.js", "MongoDB", "Stripe"]),
            link: Some("github.com/johndoe/ecommerce".into()),
            highlights: strings(&[
                "Implemented secure payment processing",
                "Built responsive design for mobile and desktop",
            ]),
        }],
        certifications: vec![Certification {
            id: Uuid::from_u128(0x4001),
            name: "AWS Certified Developer".into(),
            issuer: "Amazon Web Services".into(),
            date: "2023".into(),
            credential_id: Some("AWS-123456".into()),
        }],
        languages: vec![
            Language {
                id: Uuid::from_u128(0x5001),
                name: "English".into(),
                proficiency: "Native".into(),
            },
            Language {
                id: Uuid::from_u128(0x5002),
                name: "Spanish".into(),
                proficiency: "Conversational".into(),
            },
        ],
        theme: Theme::default(),
        layout: Layout::new(
            TemplateId::Modern,
            1,
            SectionKey::ALL.to_vec(),
            BTreeMap::from([(SectionKey::Languages, false)]),
        ),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(seed_document(), seed_document());
    }

    #[test]
    fn test_seed_layout_hides_languages() {
        let doc = seed_document();
        assert!(doc.layout.is_permutation());
        assert!(!doc.layout.is_visible(SectionKey::Languages));
        assert!(doc.layout.is_visible(SectionKey::Summary));
    }

    #[test]
    fn test_seed_round_trips_through_json() {
        let doc = seed_document();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"personalInfo\""));
        let back: ResumeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
