pub mod ionos;
