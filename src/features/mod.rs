pub mod contributors;
