mod prefab_seed;
