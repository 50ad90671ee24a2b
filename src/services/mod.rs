/*
 * Responsibility
 * - トークン検証などドメインロジック (HTTP 非依存に近い層)
 */
pub mod auth;
