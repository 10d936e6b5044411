use super::{InstructionList, Loader, NewInstruction, announce, reject};
use crate::{
    Result,
    api::{ApiClient, Body, Envelope, Query},
};
use async_trait::async_trait;

pub const INSTRUCTIONS_PATH: &str = "/instructions";
pub const TITLE_AND_CONTENT_REQUIRED: &str = "Заголовок и текст обязательны";

#[derive(Debug, Clone, Copy, Default)]
pub struct InstructionsLoader;

#[async_trait]
impl Loader for InstructionsLoader {
    type Output = InstructionList;

    async fn load(&self, api: &ApiClient) -> Result<InstructionList> {
        api.get(INSTRUCTIONS_PATH, Query::new())
            .await?
            .into_result()?
            .decode_or_notify(api)
    }
}

impl NewInstruction {
    /// Trims the text fields, turns a blank video link into `None` and a
    /// non-positive position into 1.
    pub fn normalized(self) -> Self {
        let video_url = self
            .video_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            video_url,
            order_index: if self.order_index > 0 { self.order_index } else { 1 },
        }
    }
}

pub async fn create(api: &ApiClient, instruction: NewInstruction) -> Result<Envelope> {
    let instruction = instruction.normalized();
    if instruction.title.is_empty() || instruction.content.is_empty() {
        return Err(reject(api, TITLE_AND_CONTENT_REQUIRED));
    }

    let envelope = api
        .post(INSTRUCTIONS_PATH, Body::json(&instruction)?)
        .await?
        .into_result()?;
    announce(api, &envelope);
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalized_fills_defaults() {
        let instruction = NewInstruction {
            title: "  Setup ".to_string(),
            content: "Step one\n".to_string(),
            video_url: Some("   ".to_string()),
            order_index: 0,
        }
        .normalized();

        assert_eq!(instruction.title, "Setup");
        assert_eq!(instruction.content, "Step one");
        assert_eq!(instruction.video_url, None);
        assert_eq!(instruction.order_index, 1);
    }

    #[test]
    fn test_missing_video_url_serializes_as_null() {
        let instruction = NewInstruction {
            title: "T".to_string(),
            content: "C".to_string(),
            video_url: None,
            order_index: 1,
        };
        let value = serde_json::to_value(&instruction).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "T", "content": "C", "video_url": null, "order_index": 1})
        );
    }
}
