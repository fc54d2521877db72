// [libs/infra/store/src/errors.rs]
/*!
 * APARATO: STORE ERROR CATALOG (V1.0)
 * CLASIFICACION: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACION SEMANTICA DE FALLOS DE PERSISTENCIA
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("[STORE_NET_FAULT]: connection failed -> {0}")]
    Connection(String),

    #[error("[STORE_QUERY_FAULT]: query rejected -> {0}")]
    Query(#[from] libsql::Error),

    #[error("[STORE_MAPPING_FAULT]: data mapping violation -> {0}")]
    Mapping(String),

    #[error("[STORE_ROUND_FAULT]: no round found")]
    RoundNotFound,

    #[error("[STORE_FLAG_FAULT]: flag value collision")]
    FlagCollision,

    #[error("[STORE_NOTFOUND_FAULT]: {0}")]
    NotFound(String),

    #[error("[STORE_CONFLICT_FAULT]: {0}")]
    Conflict(String),
}
