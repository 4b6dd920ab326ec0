//! Integration tests exercising the tree through its public surface
