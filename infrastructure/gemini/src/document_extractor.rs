use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

use business::domain::receipt::errors::ReceiptError;
use business::domain::receipt::services::{DocumentExtractorService, ExtractionResult, LineItem};
use business::domain::receipt::value_objects::{DocumentType, DocumentUpload};

use crate::client::{ContentRequest, GenerateContent, ProviderCallError};

const PRIMARY_MODEL: &str = "gemini-flash-latest";
const FALLBACK_MODEL: &str = "gemini-flash-lite-latest";
const PRIMARY_TEMPERATURE: f32 = 0.1;

const EXTRACTION_PROMPT: &str = r#"Extract data from this receipt/invoice document into JSON:
{
  "merchant": "Store or Business Name",
  "total": 0.00,
  "currency": "MXN or USD",
  "category": "Food/Transport/Health/Shopping/Services/Entertainment/Other",
  "narrative_summary": "Descriptive one-sentence summary in Spanish",
  "document_type": "Ticket or Factura",
  "items": [{"item": "name", "price": 0.00}]
}
Classification rules for "document_type":
- "Factura": Official tax invoice. Indicators: contains RFC, CFDI, Serie/Folio, Regimen Fiscal, Forma de Pago, UUID fiscal, or the word FACTURA. PDF documents are almost always Facturas.
- "Ticket": Simple point-of-sale receipt, typically thermal paper from a store register. Image files (jpg/png) are usually Tickets unless they contain Factura indicators.
Rules for "narrative_summary":
- Must start with the document type: "Factura de..." or "Ticket de...".
- Include merchant name, a brief description of what was purchased, and the total amount.
- Example: "Factura de Farmacia Guadalajara por $350.00 MXN por compra de pañales y productos de limpieza."
- Example: "Ticket de OXXO por $85.50 MXN en bebidas y snacks."
Return ONLY valid JSON."#;

/// Wire shape the model is prompted to produce. Anything that does not
/// decode into this is a malformed response, never a partial record.
#[derive(Debug, Deserialize)]
struct ExtractionPayload {
    merchant: String,
    total: f64,
    currency: String,
    category: String,
    narrative_summary: String,
    document_type: String,
    #[serde(default)]
    items: Vec<LineItemPayload>,
}

#[derive(Debug, Deserialize)]
struct LineItemPayload {
    item: String,
    price: f64,
}

pub struct GeminiDocumentExtractor {
    transport: Arc<dyn GenerateContent>,
}

impl GeminiDocumentExtractor {
    pub fn new(transport: Arc<dyn GenerateContent>) -> Self {
        Self { transport }
    }

    fn content_request(document: &DocumentUpload, temperature: Option<f32>) -> ContentRequest {
        ContentRequest {
            prompt: EXTRACTION_PROMPT.to_string(),
            document_base64: BASE64.encode(&document.bytes),
            mime_type: document.media_type.to_string(),
            temperature,
        }
    }

    fn parse_response(content: &str) -> Result<ExtractionResult, ReceiptError> {
        // Remove markdown code blocks if present
        let mut json_text = content.trim().to_string();
        if json_text.starts_with("```json") {
            json_text = json_text
                .replace("```json", "")
                .replace("```", "")
                .trim()
                .to_string();
        } else if json_text.starts_with("```") {
            json_text = json_text.replace("```", "").trim().to_string();
        }

        let payload: ExtractionPayload =
            serde_json::from_str(&json_text).map_err(|_| ReceiptError::MalformedResponse)?;

        if payload.total < 0.0 {
            return Err(ReceiptError::MalformedResponse);
        }
        let document_type = payload
            .document_type
            .parse::<DocumentType>()
            .map_err(|_| ReceiptError::MalformedResponse)?;
        // The summary must open with the document-type token the model resolved
        if !payload
            .narrative_summary
            .starts_with(&document_type.to_string())
        {
            return Err(ReceiptError::MalformedResponse);
        }

        Ok(ExtractionResult {
            merchant: payload.merchant,
            total: payload.total,
            currency: payload.currency,
            category: payload.category,
            narrative_summary: payload.narrative_summary,
            document_type,
            items: payload
                .items
                .into_iter()
                .map(|item| LineItem {
                    name: item.item,
                    price: item.price,
                })
                .collect(),
        })
    }

    fn classify(error: ProviderCallError) -> ReceiptError {
        match error {
            ProviderCallError::RateLimited | ProviderCallError::ModelNotFound => {
                ReceiptError::ProviderUnavailable
            }
            ProviderCallError::EmptyResponse => ReceiptError::MalformedResponse,
            ProviderCallError::RequestFailed(detail) => ReceiptError::ProviderError(detail),
        }
    }
}

#[async_trait]
impl DocumentExtractorService for GeminiDocumentExtractor {
    /// Two tiers, entered in fixed order: the primary model, then exactly
    /// one retry against the lighter model when the primary fails with a
    /// rate-limit or model-not-found class of error. Malformed output and
    /// any other provider failure are terminal immediately.
    async fn extract(&self, document: &DocumentUpload) -> Result<ExtractionResult, ReceiptError> {
        let request = Self::content_request(document, Some(PRIMARY_TEMPERATURE));

        match self.transport.generate(PRIMARY_MODEL, &request).await {
            Ok(text) => Self::parse_response(&text),
            Err(error) => match Self::classify(error) {
                ReceiptError::ProviderUnavailable => {
                    let retry = Self::content_request(document, None);
                    match self.transport.generate(FALLBACK_MODEL, &retry).await {
                        Ok(text) => Self::parse_response(&text),
                        Err(fallback_error) => {
                            Err(ReceiptError::ExtractionFailed(fallback_error.to_string()))
                        }
                    }
                }
                terminal => Err(terminal),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::receipt::value_objects::MediaType;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const OXXO_JSON: &str = r#"{"merchant":"OXXO","total":85.50,"currency":"MXN","category":"Food","narrative_summary":"Ticket de OXXO por $85.50 MXN en bebidas.","document_type":"Ticket","items":[{"item":"Soda","price":20.0},{"item":"Chips","price":65.50}]}"#;

    /// Scripted transport: pops one result per call and records what the
    /// extractor asked for.
    struct StubTransport {
        responses: Mutex<VecDeque<Result<String, ProviderCallError>>>,
        calls: Mutex<Vec<(String, Option<f32>)>>,
    }

    impl StubTransport {
        fn new(responses: Vec<Result<String, ProviderCallError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(vec![]),
            }
        }

        fn calls(&self) -> Vec<(String, Option<f32>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerateContent for StubTransport {
        async fn generate(
            &self,
            model: &str,
            request: &ContentRequest,
        ) -> Result<String, ProviderCallError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), request.temperature));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("stub transport called more times than scripted")
        }
    }

    fn jpeg_document() -> DocumentUpload {
        DocumentUpload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], MediaType::Jpeg).unwrap()
    }

    async fn extract_with(
        responses: Vec<Result<String, ProviderCallError>>,
    ) -> (Result<ExtractionResult, ReceiptError>, Vec<(String, Option<f32>)>) {
        let transport = Arc::new(StubTransport::new(responses));
        let extractor = GeminiDocumentExtractor::new(transport.clone());
        let result = extractor.extract(&jpeg_document()).await;
        (result, transport.calls())
    }

    #[tokio::test]
    async fn should_return_record_when_primary_responds_with_valid_json() {
        let (result, calls) = extract_with(vec![Ok(OXXO_JSON.to_string())]).await;

        let extraction = result.unwrap();
        assert_eq!(extraction.merchant, "OXXO");
        assert_eq!(extraction.total, 85.50);
        assert_eq!(extraction.currency, "MXN");
        assert_eq!(extraction.category, "Food");
        assert_eq!(extraction.document_type, DocumentType::Ticket);
        assert_eq!(extraction.items.len(), 2);
        assert_eq!(extraction.items[0].name, "Soda");
        assert_eq!(extraction.items[1].price, 65.50);

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PRIMARY_MODEL);
        assert_eq!(calls[0].1, Some(PRIMARY_TEMPERATURE));
    }

    #[tokio::test]
    async fn should_parse_fenced_response_same_as_unfenced() {
        let fenced = format!("```json\n{}\n```", OXXO_JSON);
        let (result, _) = extract_with(vec![Ok(fenced)]).await;
        let extraction = result.unwrap();
        assert_eq!(extraction.merchant, "OXXO");
        assert_eq!(extraction.total, 85.50);

        let bare_fence = format!("```\n{}\n```", OXXO_JSON);
        let (result, _) = extract_with(vec![Ok(bare_fence)]).await;
        assert_eq!(result.unwrap().merchant, "OXXO");
    }

    #[tokio::test]
    async fn should_retry_once_with_fallback_model_when_rate_limited() {
        let (result, calls) = extract_with(vec![
            Err(ProviderCallError::RateLimited),
            Ok(OXXO_JSON.to_string()),
        ])
        .await;

        assert_eq!(result.unwrap().merchant, "OXXO");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, PRIMARY_MODEL);
        assert_eq!(calls[1].0, FALLBACK_MODEL);
        // Fallback tier runs with relaxed generation settings
        assert_eq!(calls[1].1, None);
    }

    #[tokio::test]
    async fn should_retry_once_with_fallback_model_when_model_missing() {
        let (result, calls) = extract_with(vec![
            Err(ProviderCallError::ModelNotFound),
            Ok(OXXO_JSON.to_string()),
        ])
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, FALLBACK_MODEL);
    }

    #[tokio::test]
    async fn should_not_retry_generic_provider_failures() {
        let (result, calls) = extract_with(vec![Err(ProviderCallError::RequestFailed(
            "status 500".to_string(),
        ))])
        .await;

        assert!(matches!(result, Err(ReceiptError::ProviderError(_))));
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn should_not_retry_malformed_primary_output() {
        let (result, calls) =
            extract_with(vec![Ok("sorry, I could not read that".to_string())]).await;

        assert!(matches!(result, Err(ReceiptError::MalformedResponse)));
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn should_surface_extraction_failed_when_fallback_also_fails() {
        let (result, calls) = extract_with(vec![
            Err(ProviderCallError::RateLimited),
            Err(ProviderCallError::RequestFailed("status 503".to_string())),
        ])
        .await;

        assert!(matches!(result, Err(ReceiptError::ExtractionFailed(_))));
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn should_treat_malformed_fallback_output_as_terminal() {
        let (result, calls) = extract_with(vec![
            Err(ProviderCallError::ModelNotFound),
            Ok("{truncated".to_string()),
        ])
        .await;

        assert!(matches!(result, Err(ReceiptError::MalformedResponse)));
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn should_treat_empty_candidate_as_malformed_without_retry() {
        let (result, calls) = extract_with(vec![Err(ProviderCallError::EmptyResponse)]).await;

        assert!(matches!(result, Err(ReceiptError::MalformedResponse)));
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn should_reject_payload_missing_required_fields() {
        let missing_total = r#"{"merchant":"OXXO","currency":"MXN","category":"Food","narrative_summary":"Ticket de OXXO.","document_type":"Ticket","items":[]}"#;
        assert!(matches!(
            GeminiDocumentExtractor::parse_response(missing_total),
            Err(ReceiptError::MalformedResponse)
        ));
    }

    #[test]
    fn should_reject_wrong_typed_total() {
        let stringly_total = r#"{"merchant":"OXXO","total":"85.50","currency":"MXN","category":"Food","narrative_summary":"Ticket de OXXO.","document_type":"Ticket","items":[]}"#;
        assert!(matches!(
            GeminiDocumentExtractor::parse_response(stringly_total),
            Err(ReceiptError::MalformedResponse)
        ));
    }

    #[test]
    fn should_reject_negative_total() {
        let negative = r#"{"merchant":"OXXO","total":-1.0,"currency":"MXN","category":"Food","narrative_summary":"Ticket de OXXO.","document_type":"Ticket","items":[]}"#;
        assert!(matches!(
            GeminiDocumentExtractor::parse_response(negative),
            Err(ReceiptError::MalformedResponse)
        ));
    }

    #[test]
    fn should_reject_summary_not_prefixed_with_document_type() {
        let mismatched = r#"{"merchant":"CFE","total":512.0,"currency":"MXN","category":"Services","narrative_summary":"Ticket de CFE por $512.00 MXN de luz.","document_type":"Factura","items":[]}"#;
        assert!(matches!(
            GeminiDocumentExtractor::parse_response(mismatched),
            Err(ReceiptError::MalformedResponse)
        ));
    }

    #[test]
    fn should_reject_empty_summary() {
        let empty_summary = r#"{"merchant":"OXXO","total":1.0,"currency":"MXN","category":"Food","narrative_summary":"","document_type":"Ticket","items":[]}"#;
        assert!(matches!(
            GeminiDocumentExtractor::parse_response(empty_summary),
            Err(ReceiptError::MalformedResponse)
        ));
    }

    #[test]
    fn should_reject_unknown_document_type() {
        let unknown = r#"{"merchant":"OXXO","total":1.0,"currency":"MXN","category":"Food","narrative_summary":"Recibo de OXXO.","document_type":"Recibo","items":[]}"#;
        assert!(matches!(
            GeminiDocumentExtractor::parse_response(unknown),
            Err(ReceiptError::MalformedResponse)
        ));
    }

    #[test]
    fn should_pass_through_out_of_set_category_and_currency() {
        let exotic = r#"{"merchant":"Telcel","total":200.0,"currency":"BTC","category":"Telecom","narrative_summary":"Ticket de Telcel por 200 BTC.","document_type":"Ticket","items":[]}"#;
        let extraction = GeminiDocumentExtractor::parse_response(exotic).unwrap();
        assert_eq!(extraction.category, "Telecom");
        assert_eq!(extraction.currency, "BTC");
    }

    #[test]
    fn should_default_missing_items_to_empty_list() {
        let no_items = r#"{"merchant":"OXXO","total":0.0,"currency":"MXN","category":"Other","narrative_summary":"Ticket de OXXO sin importe legible.","document_type":"Ticket"}"#;
        let extraction = GeminiDocumentExtractor::parse_response(no_items).unwrap();
        assert!(extraction.items.is_empty());
        assert_eq!(extraction.total, 0.0);
    }
}
