/// Dense query embedding. Dimensionality is whatever the model returns; it is
/// not checked against the index.
pub type EmbeddingVector = Vec<f32>;
