use anyhow::Result;
use candle_core::{DType, Tensor};

/// Mean of unmasked token states, [B,T,H] -> [B,H].
pub fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let dims = hidden.dims();
    assert_eq!(dims.len(), 3, "hidden shape must be [B,T,H]");
    let hidden_dim = dims[2];

    let mask = attention_mask.to_device(hidden.device())?.to_dtype(hidden.dtype())?;
    let mask_3d = mask.unsqueeze(2)?;
    let mask_broadcast = mask_3d
        .broadcast_as(hidden.shape())
        .unwrap_or(mask_3d.repeat((1, 1, hidden_dim))?);
    let masked = (hidden * &mask_broadcast)?;
    let sum = masked.sum(1)?;
    let lengths = mask.sum(1)?.unsqueeze(1)?.to_dtype(sum.dtype())?;
    Ok(sum.broadcast_div(&lengths)?)
}

/// Row-wise L2 normalization of a [B,H] tensor, with an epsilon guard for
/// degenerate all-zero rows.
pub fn l2_normalize(emb: &Tensor) -> Result<Tensor> {
    let eps_val = match emb.dtype() { DType::F16 => 1e-6f32, _ => 1e-12f32 };
    let eps = Tensor::new(&[eps_val], emb.device())?
        .to_dtype(emb.dtype())?
        .unsqueeze(0)?;
    let norm = emb.sqr()?.sum_keepdim(1)?.sqrt()?;
    let norm = norm.broadcast_add(&eps)?;
    Ok(emb.broadcast_div(&norm)?)
}

/// Masked mean pooling followed by L2 normalization.
pub fn masked_mean_l2(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let pooled = mean_pool(hidden, attention_mask)?;
    l2_normalize(&pooled)
}
