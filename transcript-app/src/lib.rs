pub mod collapse;
