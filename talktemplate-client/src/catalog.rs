//! Static template catalog
//!
//! Display fixtures for the template list: the set of submitted templates
//! with their review status, plus the client-side filtering the list view
//! applies over them. These records are not persisted anywhere.

use talktemplate_core::{ApprovalStatus, Template};

/// The fixture catalog shown in the template list
pub fn sample_templates() -> Vec<Template> {
    vec![
        Template {
            id: 1,
            title: "신제품 출시 알림".to_string(),
            content: "안녕하세요, {{고객명}}님! 새로운 제품이 출시되었습니다...".to_string(),
            variables: vec!["고객명".to_string()],
            status: ApprovalStatus::Approved,
            category: "마케팅".to_string(),
            created_at: "2025-01-15".to_string(),
            compliance: None,
        },
        Template {
            id: 2,
            title: "할인 이벤트 안내".to_string(),
            content: "{{고객명}}님, 특별 할인 이벤트를 놓치지 마세요!...".to_string(),
            variables: vec!["고객명".to_string()],
            status: ApprovalStatus::InReview,
            category: "프로모션".to_string(),
            created_at: "2025-01-14".to_string(),
            compliance: None,
        },
        Template {
            id: 3,
            title: "주문 확인 알림".to_string(),
            content: "{{고객명}}님의 주문이 정상적으로 접수되었습니다...".to_string(),
            variables: vec!["고객명".to_string()],
            status: ApprovalStatus::Approved,
            category: "주문".to_string(),
            created_at: "2025-01-12".to_string(),
            compliance: None,
        },
        Template {
            id: 4,
            title: "배송 완료 안내".to_string(),
            content: "{{고객명}}님, 주문하신 상품이 배송 완료되었습니다...".to_string(),
            variables: vec!["고객명".to_string()],
            status: ApprovalStatus::Rejected,
            category: "배송".to_string(),
            created_at: "2025-01-10".to_string(),
            compliance: None,
        },
    ]
}

/// Client-side filtering over the catalog
pub fn filter<'a>(
    templates: &'a [Template],
    status: Option<ApprovalStatus>,
    category: Option<&str>,
) -> Vec<&'a Template> {
    templates
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| category.map_or(true, |c| t.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_shape() {
        let templates = sample_templates();
        assert_eq!(templates.len(), 4);
        assert!(templates.iter().any(|t| t.status == ApprovalStatus::Rejected));
    }

    #[test]
    fn test_filter_by_status() {
        let templates = sample_templates();
        let approved = filter(&templates, Some(ApprovalStatus::Approved), None);
        assert_eq!(approved.len(), 2);
        assert!(approved.iter().all(|t| t.status == ApprovalStatus::Approved));
    }

    #[test]
    fn test_filter_by_status_and_category() {
        let templates = sample_templates();
        let hits = filter(&templates, Some(ApprovalStatus::Approved), Some("주문"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "주문 확인 알림");

        let none = filter(&templates, Some(ApprovalStatus::Rejected), Some("마케팅"));
        assert!(none.is_empty());
    }
}
