pub mod squad;
