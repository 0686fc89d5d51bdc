//! Chess opponent core logic.
//!
//! このクレートは局面・対局進行を管理する `engine` と、コンピュータ側の手を選択する `ai` を提供します。
//! チェスのルール（合法手生成、チェック/チェックメイト判定、FEN）は `shakmaty` に委譲します。
//! UI（`kishi_cli`）から利用されることを想定しています。

#![forbid(unsafe_code)]

/// 局面・対局進行を提供するモジュール。
pub mod engine;

/// AI（難易度別の手選択アルゴリズム）を提供するモジュール。
pub mod ai;
