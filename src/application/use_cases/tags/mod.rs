pub mod collect_tags;
