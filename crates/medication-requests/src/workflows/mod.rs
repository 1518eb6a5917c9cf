pub mod medication;
