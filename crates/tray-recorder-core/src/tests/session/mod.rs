mod fake_spawner;
