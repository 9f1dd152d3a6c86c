use serde_json::json;

use crate::engine::assets::portfolio_data::PortfolioData;

/// Demonstration portfolio used when no portfolio document can be loaded.
pub fn sample_portfolio() -> PortfolioData {
    PortfolioData {
        personal_info: Some(json!({
            "name": "John Doe",
            "title": "DevOps Engineer",
            "photo": null
        })),
        skills: Some(json!([
            { "name": "Docker", "level": "Expert" },
            { "name": "Kubernetes", "level": "Advanced" },
            { "name": "AWS", "level": "Advanced" },
            { "name": "CI/CD", "level": "Expert" },
            { "name": "Python", "level": "Advanced" },
            { "name": "Terraform", "level": "Advanced" }
        ])),
        experience: Some(json!([
            {
                "title": "Senior DevOps Engineer",
                "company": "Tech Corp",
                "duration": "2020 - Present",
                "description": "Leading DevOps initiatives and cloud infrastructure.",
                "responsibilities": [
                    "Designed and implemented CI/CD pipelines",
                    "Managed Kubernetes clusters",
                    "Automated infrastructure with Terraform"
                ]
            }
        ])),
        projects: Some(json!([
            {
                "name": "Cloud Migration Project",
                "description": "Migrated entire infrastructure to AWS",
                "technologies": ["AWS", "Docker", "Kubernetes", "Terraform"]
            }
        ])),
        education: Some(json!([
            {
                "degree": "Bachelor of Science in Computer Science",
                "institution": "University of Technology",
                "year": "2016 - 2020"
            }
        ])),
        contact: Some(json!({
            "email": "john.doe@example.com",
            "phone": "+1 234 567 8900",
            "linkedin": "https://linkedin.com/in/johndoe",
            "github": "https://github.com/johndoe"
        })),
        settings: Some(json!({ "photoPosition": "top-right" })),
    }
}
