//! JSON model artifacts
//!
//! Two families are supported: linear models (optionally with a logistic
//! link) and tree ensembles aggregated either by averaging, as a random
//! forest does, or by summing margins through a logistic, as gradient
//! boosted classifiers do. Feature references are names; they are resolved
//! to row positions once, when the artifact is bound to a schema.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::FeatureVector;

use super::{Classifier, ModelError, Regressor};

fn default_threshold() -> f64 {
    0.5
}

/// Model artifact as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearArtifact),
    TreeEnsemble(TreeEnsembleArtifact),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub intercept: f64,
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub link: Link,
    /// Decision threshold when used as a classifier
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    #[default]
    Identity,
    Logistic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsembleArtifact {
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Mean,
    LogisticSum,
}

/// A tree stored as a flat node list; node 0 is the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Goes `left` when `row[feature] < threshold`, otherwise `right`
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Copy)]
enum BoundNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone)]
enum BoundKind {
    Linear {
        intercept: f64,
        weights: Vec<(usize, f64)>,
        link: Link,
    },
    Trees {
        trees: Vec<Vec<BoundNode>>,
        base_score: f64,
        aggregation: Aggregation,
    },
}

/// An artifact whose feature names have been resolved against a schema
#[derive(Debug, Clone)]
pub struct BoundModel {
    kind: BoundKind,
    schema_len: usize,
    threshold: f64,
}

fn resolve(schema: &[&str], feature: &str) -> Result<usize, ModelError> {
    schema
        .iter()
        .position(|name| *name == feature)
        .ok_or_else(|| ModelError::InvalidArtifact(format!("unknown feature '{}'", feature)))
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn bind_tree(index: usize, tree: &Tree, schema: &[&str]) -> Result<Vec<BoundNode>, ModelError> {
    if tree.nodes.is_empty() {
        return Err(ModelError::InvalidArtifact(format!("tree {} has no nodes", index)));
    }

    tree.nodes
        .iter()
        .enumerate()
        .map(|(position, node)| match node {
            TreeNode::Leaf { value } => Ok(BoundNode::Leaf(*value)),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                // Children must come after their parent, which rules out cycles
                for child in [*left, *right] {
                    if child <= position || child >= tree.nodes.len() {
                        return Err(ModelError::InvalidArtifact(format!(
                            "tree {} node {} has invalid child {}",
                            index, position, child
                        )));
                    }
                }
                Ok(BoundNode::Split {
                    feature: resolve(schema, feature)?,
                    threshold: *threshold,
                    left: *left,
                    right: *right,
                })
            }
        })
        .collect()
}

fn eval_tree(nodes: &[BoundNode], row: &[f64]) -> f64 {
    let mut position = 0;
    loop {
        match nodes[position] {
            BoundNode::Leaf(value) => return value,
            BoundNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                position = if row[feature] < threshold { left } else { right };
            }
        }
    }
}

impl ModelArtifact {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear",
            ModelArtifact::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// Resolve every feature reference against `schema`
    pub fn bind(&self, schema: &[&str]) -> Result<BoundModel, ModelError> {
        match self {
            ModelArtifact::Linear(linear) => {
                let weights = linear
                    .weights
                    .iter()
                    .map(|(name, weight)| Ok((resolve(schema, name)?, *weight)))
                    .collect::<Result<Vec<_>, ModelError>>()?;

                Ok(BoundModel {
                    kind: BoundKind::Linear {
                        intercept: linear.intercept,
                        weights,
                        link: linear.link,
                    },
                    schema_len: schema.len(),
                    threshold: linear.threshold,
                })
            }
            ModelArtifact::TreeEnsemble(ensemble) => {
                if ensemble.trees.is_empty() {
                    return Err(ModelError::InvalidArtifact(
                        "tree ensemble has no trees".to_string(),
                    ));
                }
                let trees = ensemble
                    .trees
                    .iter()
                    .enumerate()
                    .map(|(index, tree)| bind_tree(index, tree, schema))
                    .collect::<Result<Vec<_>, ModelError>>()?;

                Ok(BoundModel {
                    kind: BoundKind::Trees {
                        trees,
                        base_score: ensemble.base_score,
                        aggregation: ensemble.aggregation,
                    },
                    schema_len: schema.len(),
                    threshold: ensemble.threshold,
                })
            }
        }
    }
}

impl BoundModel {
    /// Read an artifact from disk and bind it to the schema of `V`
    pub fn load<V: FeatureVector>(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let load_error = |message: String| ModelError::Load {
            path: path.display().to_string(),
            message,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|e| load_error(e.to_string()))?;
        let model = artifact.bind(V::FEATURE_NAMES)?;

        tracing::info!(
            "Loaded {} model from {} ({} features)",
            artifact.kind_name(),
            path.display(),
            V::FEATURE_NAMES.len()
        );

        Ok(model)
    }

    /// Whether the output passes through a logistic and is a probability
    pub fn emits_probability(&self) -> bool {
        match &self.kind {
            BoundKind::Linear { link, .. } => *link == Link::Logistic,
            BoundKind::Trees { aggregation, .. } => *aggregation == Aggregation::LogisticSum,
        }
    }

    /// Model output for one row
    pub fn score(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.schema_len {
            return Err(ModelError::Evaluation(format!(
                "row has {} values, expected {}",
                row.len(),
                self.schema_len
            )));
        }

        let output = match &self.kind {
            BoundKind::Linear {
                intercept,
                weights,
                link,
            } => {
                let margin = intercept
                    + weights
                        .iter()
                        .map(|(feature, weight)| row[*feature] * weight)
                        .sum::<f64>();
                match link {
                    Link::Identity => margin,
                    Link::Logistic => sigmoid(margin),
                }
            }
            BoundKind::Trees {
                trees,
                base_score,
                aggregation,
            } => {
                let total: f64 = trees.iter().map(|nodes| eval_tree(nodes, row)).sum();
                match aggregation {
                    Aggregation::Mean => base_score + total / trees.len() as f64,
                    Aggregation::LogisticSum => sigmoid(base_score + total),
                }
            }
        };

        if !output.is_finite() {
            return Err(ModelError::Evaluation(
                "model produced a non-finite output".to_string(),
            ));
        }
        Ok(output)
    }
}

impl Classifier for BoundModel {
    fn predict(&self, row: &[f64]) -> Result<bool, ModelError> {
        Ok(self.score(row)? >= self.threshold)
    }

    fn predict_probability(&self, row: &[f64]) -> Result<Option<f64>, ModelError> {
        if self.emits_probability() {
            self.score(row).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl Regressor for BoundModel {
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.score(row)
    }
}
