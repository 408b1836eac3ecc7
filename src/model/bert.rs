use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Classification head settings read from the same `config.json` as the encoder.
#[derive(Debug, Default, Deserialize)]
struct HeadConfig {
    #[serde(default)]
    id2label: Option<HashMap<String, String>>,
}

impl HeadConfig {
    fn num_labels(&self) -> usize {
        self.id2label.as_ref().map_or(1, |labels| labels.len().max(1))
    }
}

struct CrossEncoderImpl {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
}

impl CrossEncoderImpl {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        // `*ForSequenceClassification` exports nest the encoder under `bert.`.
        let encoder_vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp("bert")
        } else {
            vb.clone()
        };

        let bert = BertModel::load(encoder_vb.clone(), config)?;
        let pooler = candle_nn::linear(
            config.hidden_size,
            config.hidden_size,
            encoder_vb.pp("pooler").pp("dense"),
        )?;
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self {
            bert,
            pooler,
            classifier,
        })
    }

    /// `classifier(tanh(pooler(CLS)))`, the sequence-classification head.
    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let output = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let cls_token = output.i((.., 0, ..))?;
        let pooled = self.pooler.forward(&cls_token)?.tanh()?;
        self.classifier.forward(&pooled)
    }
}

/// BERT encoder with a single-logit relevance head (`*ForSequenceClassification`
/// checkpoints such as `ms-marco-MiniLM-L-6-v2`).
#[derive(Clone)]
pub struct BertClassifier(std::sync::Arc<CrossEncoderImpl>);

impl BertClassifier {
    /// Loads `config.json` and `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
        let head: HeadConfig = serde_json::from_str(&config_content).unwrap_or_default();

        if head.num_labels() != 1 {
            return Err(candle::Error::Msg(format!(
                "expected a single-label relevance head, found {} labels",
                head.num_labels()
            )));
        }

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = CrossEncoderImpl::load(vb, &config)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    /// Returns one logit per row, shape `(batch, 1)`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }
}
