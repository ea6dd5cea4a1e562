pub mod which;
