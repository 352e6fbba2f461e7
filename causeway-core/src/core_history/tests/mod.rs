/*
    Integration tests for core_history subsystem

    Test suite covering:
    - Eviction laws (single vs batched insertion)
    - Codec round-trip law
    - Persistence edge cases and recovery scenarios
*/

pub mod eviction_properties;
