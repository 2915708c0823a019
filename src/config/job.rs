use serde::Deserialize;

use crate::layout::RecipeKind;

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub sheets: Vec<SheetJob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetJob {
    pub recipe: RecipeKind,
    #[serde(deserialize_with = "deserialize_inputs")]
    pub inputs: Vec<InputSpec>,
    pub output: String,
    pub remove_background: Option<bool>,
    pub border: Option<bool>,
    pub scales: Option<Vec<f32>>,
    pub mask_threshold: Option<f32>,
    pub auto_crop: Option<bool>,
}

/// 入力画像1枚分の指定。`mask` は前景信頼度のグレースケール画像。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputSpec {
    pub path: String,
    pub mask: Option<String>,
}

/// 入力は文字列（パスのみ）とマッピング（`path` + `mask`）の両方を受け付ける。
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Path(String),
    Full(InputSpec),
}

fn deserialize_inputs<'de, D>(deserializer: D) -> Result<Vec<InputSpec>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<RawInput>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|r| match r {
            RawInput::Path(path) => InputSpec { path, mask: None },
            RawInput::Full(spec) => spec,
        })
        .collect())
}

impl SheetJob {
    /// コラージュ用スケール係数を解決する。未指定なら全画像 1.0。
    pub fn resolve_scales(&self) -> crate::error::Result<Vec<f32>> {
        match &self.scales {
            None => Ok(vec![1.0; self.inputs.len()]),
            Some(scales) if scales.len() == self.inputs.len() => Ok(scales.clone()),
            Some(scales) => Err(crate::error::SheetError::config(format!(
                "scales has {} entries but {} inputs were given",
                scales.len(),
                self.inputs.len()
            ))),
        }
    }
}
