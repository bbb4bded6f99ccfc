pub mod commit;
pub mod commit_id;
