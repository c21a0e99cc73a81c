//! Simulated template assistant
//!
//! There is no generation backend: the assistant answers any non-empty
//! input with a fixed acknowledgement after a fixed delay and substitutes a
//! static drafted template. A real dialogue engine would need its own
//! service and is out of scope here.

use std::time::Duration;

use talktemplate_core::{ApprovalStatus, ComplianceReport, Template};
use tokio::time::sleep;

/// Opening message of a fresh conversation
pub const GREETING: &str =
    "안녕하세요! 카카오 알림톡 템플릿 생성을 도와드리겠습니다. 어떤 종류의 알림톡을 만들고 싶으신가요?";

/// Opening message after the user starts over
pub const NEW_CONVERSATION_GREETING: &str =
    "안녕하세요! 새로운 템플릿 생성을 시작하겠습니다. 어떤 목적의 알림톡을 만들고 싶으신가요?";

const CANNED_REPLY: &str =
    "좋습니다! 신제품 출시 알림톡을 만들어드리겠습니다. 제품명과 주요 특징을 알려주세요.";

const DRAFT_CONTENT: &str = "안녕하세요, {{고객명}}님!

🎉 새로운 제품이 출시되었습니다!

📱 제품명: {{제품명}}
💰 가격: {{가격}}
🚚 배송: {{배송정보}}

지금 주문하시면 특별 할인 혜택을 받으실 수 있습니다.

▶ 주문하기: {{주문링크}}

감사합니다.";

/// Assistant reply: the chat message plus the substituted template draft
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub content: String,
    pub template: Template,
}

/// Fixed-delay canned assistant
pub struct Assistant {
    delay: Duration,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

impl Assistant {
    /// Assistant with the production delay of one second
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(1000),
        }
    }

    /// Assistant with a custom delay (zero in tests)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Produce the simulated response; empty input gets no reply
    ///
    /// The input is not interpreted - the reply and template are fixed.
    pub async fn reply(&self, input: &str) -> Option<AssistantReply> {
        if input.trim().is_empty() {
            return None;
        }

        sleep(self.delay).await;

        Some(AssistantReply {
            content: CANNED_REPLY.to_string(),
            template: drafted_template(),
        })
    }
}

/// The static template draft substituted for every conversation
pub fn drafted_template() -> Template {
    Template {
        id: 0,
        title: "신제품 출시 알림".to_string(),
        content: DRAFT_CONTENT.to_string(),
        variables: vec![
            "고객명".to_string(),
            "제품명".to_string(),
            "가격".to_string(),
            "배송정보".to_string(),
            "주문링크".to_string(),
        ],
        status: ApprovalStatus::InReview,
        category: "마케팅".to_string(),
        created_at: String::new(),
        compliance: Some(ComplianceReport {
            score: 95,
            issues: vec![],
            suggestions: vec![
                "고객명 변수 사용으로 개인화 효과 증대".to_string(),
                "명확한 CTA 버튼 포함".to_string(),
            ],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_ignores_input_content() {
        let assistant = Assistant::with_delay(Duration::ZERO);

        let first = assistant.reply("배송 안내 템플릿").await.unwrap();
        let second = assistant.reply("완전히 다른 입력").await.unwrap();

        assert_eq!(first.content, second.content);
        assert_eq!(first.template.title, "신제품 출시 알림");
    }

    #[tokio::test]
    async fn test_empty_input_gets_no_reply() {
        let assistant = Assistant::with_delay(Duration::ZERO);
        assert!(assistant.reply("   ").await.is_none());
    }

    #[test]
    fn test_drafted_template_variables_match_content() {
        let template = drafted_template();
        for variable in &template.variables {
            assert!(
                template.content.contains(&format!("{{{{{}}}}}", variable)),
                "variable {} missing from content",
                variable
            );
        }
        assert_eq!(template.compliance.unwrap().score, 95);
    }
}
